//! Network/compute provisioning pipeline
//!
//! A fixed, hand-ordered sequence of EC2 calls: run the instance, create the
//! default VPC and internet gateway, create subnet/route table/security
//! group inside the default VPC, create the network interface, then attach
//! the gateway to the VPC and the interface to the instance.
//!
//! The ordering is specific to this one topology; there is no generic
//! dependency graph. Steps run strictly top to bottom and the first error
//! aborts the run with everything created so far left in place.

use crate::api::{Ec2Api, InstanceSpec};
use skylift_cloud::{single_match, ResourceHandle, Result, RunReport};

/// Everything the network pipeline needs, resolved up front from CLI flags
#[derive(Debug, Clone)]
pub struct NetworkPlan {
    pub instance: InstanceSpec,
    pub security_group_name: String,
    pub security_group_description: String,
    pub cidr_block: String,
    pub nic_description: String,
    pub nic_private_ip: Option<String>,
    /// Device index for the interface-to-instance attachment
    pub device_index: i32,
}

/// Driver for the network/compute provisioning scenario
pub struct NetworkPipeline {
    plan: NetworkPlan,
}

impl NetworkPipeline {
    pub fn new(plan: NetworkPlan) -> Self {
        Self { plan }
    }

    /// Run every step in order against the given EC2 API.
    ///
    /// Calls are not idempotent; running this twice provisions two of
    /// everything that AWS does not itself reject as a duplicate.
    pub async fn run(&self, api: &dyn Ec2Api) -> Result<RunReport> {
        let mut report = RunReport::new();
        let start = std::time::Instant::now();

        tracing::info!("provisioning network/compute resources");

        let instance_id = api.run_instance(&self.plan.instance).await?;
        tracing::info!("created instance {instance_id}");
        report.record("run-instance", ResourceHandle::new("instance", instance_id));

        let vpc_id = api.create_default_vpc().await?;
        tracing::info!("created default VPC {vpc_id}");
        report.record("create-default-vpc", ResourceHandle::new("vpc", vpc_id));

        let gateway_id = api.create_internet_gateway().await?;
        tracing::info!("created internet gateway {gateway_id}");
        report.record(
            "create-internet-gateway",
            ResourceHandle::new("internet-gateway", gateway_id),
        );

        let vpc_id = resolve_default_vpc(api).await?;
        let subnet_id = api.create_subnet(&vpc_id, &self.plan.cidr_block).await?;
        tracing::info!("created subnet {subnet_id} in {vpc_id}");
        report.record("create-subnet", ResourceHandle::new("subnet", subnet_id));

        let vpc_id = resolve_default_vpc(api).await?;
        let route_table_id = api.create_route_table(&vpc_id).await?;
        tracing::info!("created route table {route_table_id}");
        report.record(
            "create-route-table",
            ResourceHandle::new("route-table", route_table_id),
        );

        let vpc_id = resolve_default_vpc(api).await?;
        let group_id = api
            .create_security_group(
                &self.plan.security_group_name,
                &self.plan.security_group_description,
                &vpc_id,
            )
            .await?;
        tracing::info!("created security group {group_id}");
        report.record(
            "create-security-group",
            ResourceHandle::new("security-group", group_id),
        );

        let group_id = resolve_security_group(api, &self.plan.security_group_name).await?;
        let subnet_id = resolve_subnet(api).await?;
        let nic_id = api
            .create_network_interface(
                &self.plan.nic_description,
                &group_id,
                &subnet_id,
                self.plan.nic_private_ip.as_deref(),
            )
            .await?;
        tracing::info!("created network interface {nic_id}");
        report.record(
            "create-network-interface",
            ResourceHandle::new("network-interface", nic_id),
        );

        let gateway_id = resolve_internet_gateway(api).await?;
        let vpc_id = resolve_default_vpc(api).await?;
        api.attach_internet_gateway(&gateway_id, &vpc_id).await?;
        tracing::info!("attached internet gateway {gateway_id} to {vpc_id}");
        report.record_ack("attach-internet-gateway");

        let instance_id = resolve_instance(api).await?;
        let nic_id = resolve_network_interface(api).await?;
        let attachment_id = api
            .attach_network_interface(&nic_id, &instance_id, self.plan.device_index)
            .await?;
        tracing::info!("attached network interface {nic_id} to {instance_id}");
        report.record(
            "attach-network-interface",
            ResourceHandle::new("eni-attachment", attachment_id),
        );

        report.duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            "network pipeline completed: {} steps in {}ms",
            report.len(),
            report.duration_ms
        );
        Ok(report)
    }
}

// Resolvers re-query the provider on every call; nothing is cached within a
// run.

async fn resolve_default_vpc(api: &dyn Ec2Api) -> Result<String> {
    let vpcs = api.describe_default_vpcs().await?;
    Ok(single_match(vpcs, "default VPC", "isDefault=true")?.vpc_id)
}

async fn resolve_security_group(api: &dyn Ec2Api, name: &str) -> Result<String> {
    let groups = api.describe_security_groups_by_name(name).await?;
    Ok(single_match(groups, "security group", format!("group-name={name}"))?.group_id)
}

async fn resolve_subnet(api: &dyn Ec2Api) -> Result<String> {
    let subnets = api.describe_subnets().await?;
    Ok(single_match(subnets, "subnet", "all")?.subnet_id)
}

async fn resolve_instance(api: &dyn Ec2Api) -> Result<String> {
    let instances = api.describe_instances().await?;
    Ok(single_match(instances, "instance", "all")?.instance_id)
}

async fn resolve_network_interface(api: &dyn Ec2Api) -> Result<String> {
    let interfaces = api.describe_network_interfaces().await?;
    Ok(single_match(interfaces, "network interface", "all")?.network_interface_id)
}

async fn resolve_internet_gateway(api: &dyn Ec2Api) -> Result<String> {
    let gateways = api.describe_internet_gateways().await?;
    Ok(single_match(gateways, "internet gateway", "all")?.internet_gateway_id)
}
