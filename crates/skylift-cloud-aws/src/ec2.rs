//! EC2 SDK adapter
//!
//! Wraps the official EC2 client behind [`Ec2Api`]. Every operation error is
//! mapped to [`CloudError::Api`] with the operation name; responses are
//! reduced to the identifier field the pipelines actually consume.

use crate::api::{
    Ec2Api, InstanceSpec, InstanceSummary, InternetGatewaySummary, NetworkInterfaceSummary,
    SecurityGroupSummary, SubnetSummary, VpcSummary,
};
use async_trait::async_trait;
use aws_sdk_ec2::types::{Filter, InstanceType, ResourceType, Tag, TagSpecification};
use skylift_cloud::{CloudError, Result};

/// EC2 adapter over the official SDK client
pub struct SdkEc2 {
    client: aws_sdk_ec2::Client,
}

impl SdkEc2 {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_ec2::Client::new(config),
        }
    }
}

#[async_trait]
impl Ec2Api for SdkEc2 {
    async fn run_instance(&self, spec: &InstanceSpec) -> Result<String> {
        let tags = TagSpecification::builder()
            .resource_type(ResourceType::Instance)
            .tags(Tag::builder().key("Name").value(&spec.name_tag).build())
            .build();

        let out = self
            .client
            .run_instances()
            .image_id(&spec.image_id)
            .instance_type(InstanceType::from(spec.instance_type.as_str()))
            .key_name(&spec.key_name)
            .min_count(1)
            .max_count(1)
            .tag_specifications(tags)
            .send()
            .await
            .map_err(|e| CloudError::api("RunInstances", e))?;

        out.instances()
            .first()
            .and_then(|i| i.instance_id())
            .map(str::to_owned)
            .ok_or_else(|| CloudError::api("RunInstances", "response missing InstanceId"))
    }

    async fn create_default_vpc(&self) -> Result<String> {
        let out = self
            .client
            .create_default_vpc()
            .send()
            .await
            .map_err(|e| CloudError::api("CreateDefaultVpc", e))?;

        out.vpc()
            .and_then(|v| v.vpc_id())
            .map(str::to_owned)
            .ok_or_else(|| CloudError::api("CreateDefaultVpc", "response missing VpcId"))
    }

    async fn create_security_group(
        &self,
        name: &str,
        description: &str,
        vpc_id: &str,
    ) -> Result<String> {
        let out = self
            .client
            .create_security_group()
            .group_name(name)
            .description(description)
            .vpc_id(vpc_id)
            .send()
            .await
            .map_err(|e| CloudError::api("CreateSecurityGroup", e))?;

        out.group_id()
            .map(str::to_owned)
            .ok_or_else(|| CloudError::api("CreateSecurityGroup", "response missing GroupId"))
    }

    async fn create_internet_gateway(&self) -> Result<String> {
        let out = self
            .client
            .create_internet_gateway()
            .send()
            .await
            .map_err(|e| CloudError::api("CreateInternetGateway", e))?;

        out.internet_gateway()
            .and_then(|g| g.internet_gateway_id())
            .map(str::to_owned)
            .ok_or_else(|| {
                CloudError::api("CreateInternetGateway", "response missing InternetGatewayId")
            })
    }

    async fn create_subnet(&self, vpc_id: &str, cidr_block: &str) -> Result<String> {
        let out = self
            .client
            .create_subnet()
            .vpc_id(vpc_id)
            .cidr_block(cidr_block)
            .send()
            .await
            .map_err(|e| CloudError::api("CreateSubnet", e))?;

        out.subnet()
            .and_then(|s| s.subnet_id())
            .map(str::to_owned)
            .ok_or_else(|| CloudError::api("CreateSubnet", "response missing SubnetId"))
    }

    async fn create_network_interface(
        &self,
        description: &str,
        group_id: &str,
        subnet_id: &str,
        private_ip: Option<&str>,
    ) -> Result<String> {
        let mut req = self
            .client
            .create_network_interface()
            .description(description)
            .groups(group_id)
            .subnet_id(subnet_id);

        if let Some(ip) = private_ip {
            req = req.private_ip_address(ip);
        }

        let out = req
            .send()
            .await
            .map_err(|e| CloudError::api("CreateNetworkInterface", e))?;

        out.network_interface()
            .and_then(|n| n.network_interface_id())
            .map(str::to_owned)
            .ok_or_else(|| {
                CloudError::api(
                    "CreateNetworkInterface",
                    "response missing NetworkInterfaceId",
                )
            })
    }

    async fn create_route_table(&self, vpc_id: &str) -> Result<String> {
        let out = self
            .client
            .create_route_table()
            .vpc_id(vpc_id)
            .send()
            .await
            .map_err(|e| CloudError::api("CreateRouteTable", e))?;

        out.route_table()
            .and_then(|r| r.route_table_id())
            .map(str::to_owned)
            .ok_or_else(|| CloudError::api("CreateRouteTable", "response missing RouteTableId"))
    }

    async fn attach_internet_gateway(
        &self,
        internet_gateway_id: &str,
        vpc_id: &str,
    ) -> Result<()> {
        self.client
            .attach_internet_gateway()
            .internet_gateway_id(internet_gateway_id)
            .vpc_id(vpc_id)
            .send()
            .await
            .map_err(|e| CloudError::api("AttachInternetGateway", e))?;

        Ok(())
    }

    async fn attach_network_interface(
        &self,
        network_interface_id: &str,
        instance_id: &str,
        device_index: i32,
    ) -> Result<String> {
        let out = self
            .client
            .attach_network_interface()
            .network_interface_id(network_interface_id)
            .instance_id(instance_id)
            .device_index(device_index)
            .send()
            .await
            .map_err(|e| CloudError::api("AttachNetworkInterface", e))?;

        out.attachment_id()
            .map(str::to_owned)
            .ok_or_else(|| {
                CloudError::api("AttachNetworkInterface", "response missing AttachmentId")
            })
    }

    async fn describe_default_vpcs(&self) -> Result<Vec<VpcSummary>> {
        let out = self
            .client
            .describe_vpcs()
            .filters(Filter::builder().name("isDefault").values("true").build())
            .send()
            .await
            .map_err(|e| CloudError::api("DescribeVpcs", e))?;

        Ok(out
            .vpcs()
            .iter()
            .filter_map(|v| {
                v.vpc_id().map(|id| VpcSummary {
                    vpc_id: id.to_owned(),
                    is_default: v.is_default().unwrap_or(false),
                })
            })
            .collect())
    }

    async fn describe_security_groups_by_name(
        &self,
        name: &str,
    ) -> Result<Vec<SecurityGroupSummary>> {
        let out = self
            .client
            .describe_security_groups()
            .group_names(name)
            .send()
            .await
            .map_err(|e| CloudError::api("DescribeSecurityGroups", e))?;

        Ok(out
            .security_groups()
            .iter()
            .filter_map(|g| {
                g.group_id().map(|id| SecurityGroupSummary {
                    group_id: id.to_owned(),
                    group_name: g.group_name().unwrap_or_default().to_owned(),
                })
            })
            .collect())
    }

    async fn describe_subnets(&self) -> Result<Vec<SubnetSummary>> {
        let out = self
            .client
            .describe_subnets()
            .send()
            .await
            .map_err(|e| CloudError::api("DescribeSubnets", e))?;

        Ok(out
            .subnets()
            .iter()
            .filter_map(|s| {
                s.subnet_id().map(|id| SubnetSummary {
                    subnet_id: id.to_owned(),
                    vpc_id: s.vpc_id().map(str::to_owned),
                })
            })
            .collect())
    }

    async fn describe_instances(&self) -> Result<Vec<InstanceSummary>> {
        let out = self
            .client
            .describe_instances()
            .send()
            .await
            .map_err(|e| CloudError::api("DescribeInstances", e))?;

        Ok(out
            .reservations()
            .iter()
            .flat_map(|r| r.instances())
            .filter_map(|i| {
                i.instance_id().map(|id| InstanceSummary {
                    instance_id: id.to_owned(),
                })
            })
            .collect())
    }

    async fn describe_network_interfaces(&self) -> Result<Vec<NetworkInterfaceSummary>> {
        let out = self
            .client
            .describe_network_interfaces()
            .send()
            .await
            .map_err(|e| CloudError::api("DescribeNetworkInterfaces", e))?;

        Ok(out
            .network_interfaces()
            .iter()
            .filter_map(|n| {
                n.network_interface_id().map(|id| NetworkInterfaceSummary {
                    network_interface_id: id.to_owned(),
                })
            })
            .collect())
    }

    async fn describe_internet_gateways(&self) -> Result<Vec<InternetGatewaySummary>> {
        let out = self
            .client
            .describe_internet_gateways()
            .send()
            .await
            .map_err(|e| CloudError::api("DescribeInternetGateways", e))?;

        Ok(out
            .internet_gateways()
            .iter()
            .filter_map(|g| {
                g.internet_gateway_id().map(|id| InternetGatewaySummary {
                    internet_gateway_id: id.to_owned(),
                })
            })
            .collect())
    }
}
