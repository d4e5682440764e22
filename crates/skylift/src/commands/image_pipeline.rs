use colored::Colorize;
use skylift_cloud_aws::{AwsConfig, ImagePipeline, ImagePlan, SdkImageBuilder};

pub struct ImagePipelineArgs {
    pub account_id: String,
    pub access_key: String,
    pub secret_access_key: String,
    pub region: String,
    pub component_name: String,
    pub component_version: String,
    pub platform: String,
    pub recipe_name: String,
    pub recipe_version: String,
    pub image_name: String,
    pub os_version: String,
    pub distribution_name: String,
    pub infrastructure_name: String,
    pub instance_type: String,
    pub instance_profile: String,
    pub pipeline_name: String,
}

pub async fn handle(args: ImagePipelineArgs) -> anyhow::Result<()> {
    println!("{}", "Provisioning image pipeline...".blue().bold());
    println!("Region: {}", args.region.cyan());
    println!(
        "Pipeline: {} (recipe {} {})",
        args.pipeline_name.cyan(),
        args.recipe_name,
        args.recipe_version
    );

    let config = AwsConfig {
        region: args.region.clone(),
        access_key: args.access_key,
        secret_access_key: args.secret_access_key,
    };
    let imagebuilder = SdkImageBuilder::new(&config.load().await);

    let plan = ImagePlan {
        region: args.region,
        account_id: args.account_id,
        component_name: args.component_name,
        component_version: args.component_version,
        platform: args.platform,
        recipe_name: args.recipe_name,
        recipe_version: args.recipe_version,
        image_name: args.image_name,
        os_version: args.os_version,
        distribution_name: args.distribution_name,
        infrastructure_name: args.infrastructure_name,
        instance_type: args.instance_type,
        instance_profile: args.instance_profile,
        pipeline_name: args.pipeline_name,
    };

    let report = ImagePipeline::new(plan).run(&imagebuilder).await?;
    super::print_report(&report);

    Ok(())
}
