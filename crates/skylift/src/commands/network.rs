use colored::Colorize;
use skylift_cloud_aws::api::InstanceSpec;
use skylift_cloud_aws::{AwsConfig, NetworkPipeline, NetworkPlan, SdkEc2};

pub struct NetworkArgs {
    pub access_key: String,
    pub secret_access_key: String,
    pub region: String,
    pub image_id: String,
    pub instance_type: String,
    pub key_name: String,
    pub instance_name: String,
    pub security_group_name: String,
    pub security_group_description: String,
    pub cidr_block: String,
    pub private_ip: String,
    pub nic_description: String,
    pub device_index: i32,
}

pub async fn handle(args: NetworkArgs) -> anyhow::Result<()> {
    println!("{}", "Provisioning network/compute resources...".blue().bold());
    println!("Region: {}", args.region.cyan());
    println!(
        "Instance: {} ({})",
        args.instance_name.cyan(),
        args.instance_type
    );
    println!();
    println!(
        "{}",
        "Warning: this creates billable resources and is not idempotent.".yellow()
    );

    let config = AwsConfig {
        region: args.region,
        access_key: args.access_key,
        secret_access_key: args.secret_access_key,
    };
    let ec2 = SdkEc2::new(&config.load().await);

    let plan = NetworkPlan {
        instance: InstanceSpec {
            image_id: args.image_id,
            instance_type: args.instance_type,
            key_name: args.key_name,
            name_tag: args.instance_name,
        },
        security_group_name: args.security_group_name,
        security_group_description: args.security_group_description,
        cidr_block: args.cidr_block,
        nic_description: args.nic_description,
        nic_private_ip: Some(args.private_ip),
        device_index: args.device_index,
    };

    let report = NetworkPipeline::new(plan).run(&ec2).await?;
    super::print_report(&report);

    Ok(())
}
