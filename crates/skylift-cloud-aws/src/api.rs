//! AWS capability traits
//!
//! The pipeline drivers talk to AWS only through these traits, one per API
//! family. Each method maps 1:1 to a management call: create operations
//! return the provider-issued identifier, describe operations return the raw
//! list of candidate rows (reducing a list to one id is the resolver's job,
//! see [`skylift_cloud::single_match`]), and attach operations associate two
//! already-resolved identifiers.
//!
//! [`crate::SdkEc2`] and [`crate::SdkImageBuilder`] implement these over the
//! official SDK clients; tests implement them with recording fakes.

use async_trait::async_trait;
use skylift_cloud::Result;

/// Attributes needed to run one EC2 instance
#[derive(Debug, Clone)]
pub struct InstanceSpec {
    pub image_id: String,
    pub instance_type: String,
    pub key_name: String,
    /// Value of the `Name` tag applied to the instance
    pub name_tag: String,
}

#[derive(Debug, Clone)]
pub struct VpcSummary {
    pub vpc_id: String,
    pub is_default: bool,
}

#[derive(Debug, Clone)]
pub struct SecurityGroupSummary {
    pub group_id: String,
    pub group_name: String,
}

#[derive(Debug, Clone)]
pub struct SubnetSummary {
    pub subnet_id: String,
    pub vpc_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct InstanceSummary {
    pub instance_id: String,
}

#[derive(Debug, Clone)]
pub struct NetworkInterfaceSummary {
    pub network_interface_id: String,
}

#[derive(Debug, Clone)]
pub struct InternetGatewaySummary {
    pub internet_gateway_id: String,
}

/// EC2 management operations used by the network/compute pipeline
#[async_trait]
pub trait Ec2Api: Send + Sync {
    /// RunInstances with min/max count 1; returns the instance id
    async fn run_instance(&self, spec: &InstanceSpec) -> Result<String>;

    /// CreateDefaultVpc; returns the VPC id
    async fn create_default_vpc(&self) -> Result<String>;

    /// CreateSecurityGroup in the given VPC; returns the group id
    async fn create_security_group(
        &self,
        name: &str,
        description: &str,
        vpc_id: &str,
    ) -> Result<String>;

    /// CreateInternetGateway; returns the gateway id
    async fn create_internet_gateway(&self) -> Result<String>;

    /// CreateSubnet; returns the subnet id
    async fn create_subnet(&self, vpc_id: &str, cidr_block: &str) -> Result<String>;

    /// CreateNetworkInterface; returns the interface id
    async fn create_network_interface(
        &self,
        description: &str,
        group_id: &str,
        subnet_id: &str,
        private_ip: Option<&str>,
    ) -> Result<String>;

    /// CreateRouteTable; returns the route table id
    async fn create_route_table(&self, vpc_id: &str) -> Result<String>;

    /// AttachInternetGateway
    async fn attach_internet_gateway(
        &self,
        internet_gateway_id: &str,
        vpc_id: &str,
    ) -> Result<()>;

    /// AttachNetworkInterface at the given device index; returns the
    /// attachment id
    async fn attach_network_interface(
        &self,
        network_interface_id: &str,
        instance_id: &str,
        device_index: i32,
    ) -> Result<String>;

    /// DescribeVpcs filtered on `isDefault=true`
    async fn describe_default_vpcs(&self) -> Result<Vec<VpcSummary>>;

    /// DescribeSecurityGroups by group name
    async fn describe_security_groups_by_name(
        &self,
        name: &str,
    ) -> Result<Vec<SecurityGroupSummary>>;

    /// DescribeSubnets, unfiltered
    async fn describe_subnets(&self) -> Result<Vec<SubnetSummary>>;

    /// DescribeInstances, flattened across reservations
    async fn describe_instances(&self) -> Result<Vec<InstanceSummary>>;

    /// DescribeNetworkInterfaces, unfiltered
    async fn describe_network_interfaces(&self) -> Result<Vec<NetworkInterfaceSummary>>;

    /// DescribeInternetGateways, unfiltered
    async fn describe_internet_gateways(&self) -> Result<Vec<InternetGatewaySummary>>;
}

/// Attributes needed to create one Image Builder component
#[derive(Debug, Clone)]
pub struct ComponentSpec {
    pub name: String,
    pub semantic_version: String,
    /// Platform string as Image Builder expects it ("Linux", "Windows")
    pub platform: String,
    pub supported_os_version: String,
    pub description: String,
    /// The serialized two-phase component document, submitted as an opaque
    /// blob (see [`crate::component`])
    pub data_yaml: String,
}

/// Attributes needed to create one image recipe
#[derive(Debug, Clone)]
pub struct RecipeSpec {
    pub name: String,
    pub semantic_version: String,
    pub component_arn: String,
    pub parent_image_arn: String,
}

/// Attributes needed to create one image pipeline
#[derive(Debug, Clone)]
pub struct PipelineSpec {
    pub name: String,
    pub description: String,
    pub image_recipe_arn: String,
    pub infrastructure_configuration_arn: String,
    pub distribution_configuration_arn: String,
}

/// Image Builder operations used by the image pipeline
#[async_trait]
pub trait ImageBuilderApi: Send + Sync {
    /// CreateComponent; returns the component build version ARN
    async fn create_component(&self, spec: &ComponentSpec) -> Result<String>;

    /// CreateImageRecipe; returns the image recipe ARN
    async fn create_image_recipe(&self, spec: &RecipeSpec) -> Result<String>;

    /// CreateDistributionConfiguration with a single AMI distribution in the
    /// given region; returns the configuration ARN
    async fn create_distribution_configuration(
        &self,
        name: &str,
        region: &str,
    ) -> Result<String>;

    /// CreateInfrastructureConfiguration; returns the configuration ARN
    async fn create_infrastructure_configuration(
        &self,
        name: &str,
        instance_type: &str,
        instance_profile: &str,
    ) -> Result<String>;

    /// CreateImagePipeline; returns the pipeline ARN
    async fn create_image_pipeline(&self, spec: &PipelineSpec) -> Result<String>;

    /// StartImagePipelineExecution; returns the image build version ARN
    async fn start_image_pipeline_execution(&self, pipeline_arn: &str) -> Result<String>;
}
