//! Network pipeline driver tests against a recording EC2 fake

use async_trait::async_trait;
use skylift_cloud::{CloudError, Result};
use skylift_cloud_aws::api::{
    Ec2Api, InstanceSpec, InstanceSummary, InternetGatewaySummary, NetworkInterfaceSummary,
    SecurityGroupSummary, SubnetSummary, VpcSummary,
};
use skylift_cloud_aws::{NetworkPipeline, NetworkPlan};
use std::sync::Mutex;

/// EC2 fake that records every call and answers resolvers with singletons.
/// Optionally fails on one named operation.
struct FakeEc2 {
    calls: Mutex<Vec<String>>,
    fail_on: Option<&'static str>,
    instance_count: Mutex<u32>,
}

impl FakeEc2 {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on: None,
            instance_count: Mutex::new(0),
        }
    }

    fn failing_on(op: &'static str) -> Self {
        Self {
            fail_on: Some(op),
            ..Self::new()
        }
    }

    fn call(&self, op: &'static str) -> Result<()> {
        self.calls.lock().unwrap().push(op.to_string());
        if self.fail_on == Some(op) {
            return Err(CloudError::api(op, "simulated rejection"));
        }
        Ok(())
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Ec2Api for FakeEc2 {
    async fn run_instance(&self, _spec: &InstanceSpec) -> Result<String> {
        self.call("run_instance")?;
        let mut count = self.instance_count.lock().unwrap();
        *count += 1;
        Ok(format!("i-{:08}", *count))
    }

    async fn create_default_vpc(&self) -> Result<String> {
        self.call("create_default_vpc")?;
        Ok("vpc-default".to_string())
    }

    async fn create_security_group(
        &self,
        _name: &str,
        _description: &str,
        vpc_id: &str,
    ) -> Result<String> {
        assert_eq!(vpc_id, "vpc-default");
        self.call("create_security_group")?;
        Ok("sg-1".to_string())
    }

    async fn create_internet_gateway(&self) -> Result<String> {
        self.call("create_internet_gateway")?;
        Ok("igw-1".to_string())
    }

    async fn create_subnet(&self, vpc_id: &str, _cidr_block: &str) -> Result<String> {
        assert_eq!(vpc_id, "vpc-default");
        self.call("create_subnet")?;
        Ok("subnet-1".to_string())
    }

    async fn create_network_interface(
        &self,
        _description: &str,
        group_id: &str,
        subnet_id: &str,
        _private_ip: Option<&str>,
    ) -> Result<String> {
        assert_eq!(group_id, "sg-1");
        assert_eq!(subnet_id, "subnet-1");
        self.call("create_network_interface")?;
        Ok("eni-1".to_string())
    }

    async fn create_route_table(&self, _vpc_id: &str) -> Result<String> {
        self.call("create_route_table")?;
        Ok("rtb-1".to_string())
    }

    async fn attach_internet_gateway(
        &self,
        internet_gateway_id: &str,
        vpc_id: &str,
    ) -> Result<()> {
        assert_eq!(internet_gateway_id, "igw-1");
        assert_eq!(vpc_id, "vpc-default");
        self.call("attach_internet_gateway")
    }

    async fn attach_network_interface(
        &self,
        network_interface_id: &str,
        instance_id: &str,
        device_index: i32,
    ) -> Result<String> {
        assert_eq!(network_interface_id, "eni-1");
        assert_eq!(instance_id, "i-00000001");
        assert_eq!(device_index, 1);
        self.call("attach_network_interface")?;
        Ok("eni-attach-1".to_string())
    }

    async fn describe_default_vpcs(&self) -> Result<Vec<VpcSummary>> {
        self.call("describe_default_vpcs")?;
        Ok(vec![VpcSummary {
            vpc_id: "vpc-default".to_string(),
            is_default: true,
        }])
    }

    async fn describe_security_groups_by_name(
        &self,
        name: &str,
    ) -> Result<Vec<SecurityGroupSummary>> {
        self.call("describe_security_groups")?;
        Ok(vec![SecurityGroupSummary {
            group_id: "sg-1".to_string(),
            group_name: name.to_string(),
        }])
    }

    async fn describe_subnets(&self) -> Result<Vec<SubnetSummary>> {
        self.call("describe_subnets")?;
        Ok(vec![SubnetSummary {
            subnet_id: "subnet-1".to_string(),
            vpc_id: Some("vpc-default".to_string()),
        }])
    }

    async fn describe_instances(&self) -> Result<Vec<InstanceSummary>> {
        self.call("describe_instances")?;
        Ok(vec![InstanceSummary {
            instance_id: "i-00000001".to_string(),
        }])
    }

    async fn describe_network_interfaces(&self) -> Result<Vec<NetworkInterfaceSummary>> {
        self.call("describe_network_interfaces")?;
        Ok(vec![NetworkInterfaceSummary {
            network_interface_id: "eni-1".to_string(),
        }])
    }

    async fn describe_internet_gateways(&self) -> Result<Vec<InternetGatewaySummary>> {
        self.call("describe_internet_gateways")?;
        Ok(vec![InternetGatewaySummary {
            internet_gateway_id: "igw-1".to_string(),
        }])
    }
}

fn plan() -> NetworkPlan {
    NetworkPlan {
        instance: InstanceSpec {
            image_id: "ami-08d4ac5b634553e16".to_string(),
            instance_type: "t2.micro".to_string(),
            key_name: "ubuntu-ssh".to_string(),
            name_tag: "skylift test".to_string(),
        },
        security_group_name: "sec_devices".to_string(),
        security_group_description: "test security group".to_string(),
        cidr_block: "10.0.0.0/24".to_string(),
        nic_description: "test nic".to_string(),
        nic_private_ip: Some("10.0.0.50".to_string()),
        device_index: 1,
    }
}

fn position(calls: &[String], op: &str) -> usize {
    calls
        .iter()
        .position(|c| c == op)
        .unwrap_or_else(|| panic!("{op} was never called"))
}

#[tokio::test]
async fn runs_all_steps_in_dependency_order() {
    let api = FakeEc2::new();
    let report = NetworkPipeline::new(plan()).run(&api).await.unwrap();

    assert_eq!(report.len(), 9);
    assert_eq!(report.steps.last().unwrap().step, "attach-network-interface");

    let calls = api.calls();

    // The default VPC is resolved before the subnet is created in it.
    assert!(position(&calls, "describe_default_vpcs") < position(&calls, "create_subnet"));

    // The security group is resolved before the interface referencing it.
    assert!(
        position(&calls, "describe_security_groups") < position(&calls, "create_network_interface")
    );

    // The gateway attachment happens only after both the gateway and the
    // VPC exist.
    let attach = position(&calls, "attach_internet_gateway");
    assert!(position(&calls, "create_internet_gateway") < attach);
    assert!(position(&calls, "create_default_vpc") < attach);

    // The interface attachment is the final provider call.
    assert_eq!(calls.last().unwrap(), "attach_network_interface");
}

#[tokio::test]
async fn resolved_handles_flow_into_dependent_steps() {
    // The FakeEc2 impl asserts the ids handed to dependent creates and
    // attaches; a wrong handle panics inside the fake.
    let api = FakeEc2::new();
    let report = NetworkPipeline::new(plan()).run(&api).await.unwrap();

    assert_eq!(report.handle_for("create-subnet").unwrap().id(), "subnet-1");
    assert_eq!(
        report.handle_for("create-network-interface").unwrap().id(),
        "eni-1"
    );
    assert_eq!(
        report.handle_for("attach-network-interface").unwrap().id(),
        "eni-attach-1"
    );
    assert!(report.handle_for("attach-internet-gateway").is_none());
}

#[tokio::test]
async fn first_failure_aborts_without_further_calls() {
    let api = FakeEc2::failing_on("create_internet_gateway");
    let err = NetworkPipeline::new(plan()).run(&api).await.unwrap_err();

    match err {
        CloudError::Api { op, .. } => assert_eq!(op, "create_internet_gateway"),
        other => panic!("expected Api error, got {other}"),
    }

    // Nothing after the failing step ran.
    let calls = api.calls();
    assert_eq!(calls.last().unwrap(), "create_internet_gateway");
    assert!(!calls.iter().any(|c| c == "create_subnet"));
    assert!(!calls.iter().any(|c| c == "attach_internet_gateway"));
}

#[tokio::test]
async fn creation_is_not_idempotent() {
    let api = FakeEc2::new();
    NetworkPipeline::new(plan()).run(&api).await.unwrap();

    // A second run issues a second RunInstances rather than reusing the
    // first instance.
    let second = NetworkPipeline::new(plan()).run(&api).await;
    // The fake keeps returning the first instance id from describe, so the
    // attach assertion still passes; what matters is the duplicate create.
    assert!(second.is_ok());
    let runs = api.calls().iter().filter(|c| *c == "run_instance").count();
    assert_eq!(runs, 2);
}

#[tokio::test]
async fn empty_lookup_surfaces_as_lookup_miss() {
    struct NoVpcs(FakeEc2);

    #[async_trait]
    impl Ec2Api for NoVpcs {
        async fn run_instance(&self, spec: &InstanceSpec) -> Result<String> {
            self.0.run_instance(spec).await
        }
        async fn create_default_vpc(&self) -> Result<String> {
            self.0.create_default_vpc().await
        }
        async fn create_security_group(
            &self,
            name: &str,
            description: &str,
            vpc_id: &str,
        ) -> Result<String> {
            self.0.create_security_group(name, description, vpc_id).await
        }
        async fn create_internet_gateway(&self) -> Result<String> {
            self.0.create_internet_gateway().await
        }
        async fn create_subnet(&self, vpc_id: &str, cidr_block: &str) -> Result<String> {
            self.0.create_subnet(vpc_id, cidr_block).await
        }
        async fn create_network_interface(
            &self,
            description: &str,
            group_id: &str,
            subnet_id: &str,
            private_ip: Option<&str>,
        ) -> Result<String> {
            self.0
                .create_network_interface(description, group_id, subnet_id, private_ip)
                .await
        }
        async fn create_route_table(&self, vpc_id: &str) -> Result<String> {
            self.0.create_route_table(vpc_id).await
        }
        async fn attach_internet_gateway(
            &self,
            internet_gateway_id: &str,
            vpc_id: &str,
        ) -> Result<()> {
            self.0.attach_internet_gateway(internet_gateway_id, vpc_id).await
        }
        async fn attach_network_interface(
            &self,
            network_interface_id: &str,
            instance_id: &str,
            device_index: i32,
        ) -> Result<String> {
            self.0
                .attach_network_interface(network_interface_id, instance_id, device_index)
                .await
        }
        async fn describe_default_vpcs(&self) -> Result<Vec<VpcSummary>> {
            Ok(Vec::new())
        }
        async fn describe_security_groups_by_name(
            &self,
            name: &str,
        ) -> Result<Vec<SecurityGroupSummary>> {
            self.0.describe_security_groups_by_name(name).await
        }
        async fn describe_subnets(&self) -> Result<Vec<SubnetSummary>> {
            self.0.describe_subnets().await
        }
        async fn describe_instances(&self) -> Result<Vec<InstanceSummary>> {
            self.0.describe_instances().await
        }
        async fn describe_network_interfaces(&self) -> Result<Vec<NetworkInterfaceSummary>> {
            self.0.describe_network_interfaces().await
        }
        async fn describe_internet_gateways(&self) -> Result<Vec<InternetGatewaySummary>> {
            self.0.describe_internet_gateways().await
        }
    }

    let api = NoVpcs(FakeEc2::new());
    let err = NetworkPipeline::new(plan()).run(&api).await.unwrap_err();

    match err {
        CloudError::LookupMiss { what, .. } => assert_eq!(what, "default VPC"),
        other => panic!("expected LookupMiss, got {other}"),
    }
}
