//! Image pipeline provisioning
//!
//! Fixed sequence against Image Builder: component, recipe, distribution
//! configuration, infrastructure configuration, the pipeline referencing all
//! of them by constructed ARN, then a first execution. Fail-fast like the
//! network pipeline; nothing is compensated on error.

use crate::api::{ComponentSpec, ImageBuilderApi, PipelineSpec, RecipeSpec};
use crate::{arn, component};
use skylift_cloud::{ResourceHandle, Result, RunReport};

/// Every name, version and identifier the image pipeline needs
#[derive(Debug, Clone)]
pub struct ImagePlan {
    pub region: String,
    pub account_id: String,
    pub component_name: String,
    pub component_version: String,
    /// Image Builder platform string ("Linux", "Windows")
    pub platform: String,
    pub recipe_name: String,
    pub recipe_version: String,
    /// Display name of the parent image (e.g. "Ubuntu Server 20"); also
    /// drives the patch-command selection
    pub image_name: String,
    pub os_version: String,
    pub distribution_name: String,
    pub infrastructure_name: String,
    pub instance_type: String,
    pub instance_profile: String,
    pub pipeline_name: String,
}

/// Driver for the image pipeline provisioning scenario
pub struct ImagePipeline {
    plan: ImagePlan,
}

impl ImagePipeline {
    pub fn new(plan: ImagePlan) -> Self {
        Self { plan }
    }

    /// Run every step in order against the given Image Builder API.
    pub async fn run(&self, api: &dyn ImageBuilderApi) -> Result<RunReport> {
        let plan = &self.plan;
        let mut report = RunReport::new();
        let start = std::time::Instant::now();

        tracing::info!("provisioning image pipeline {}", plan.pipeline_name);

        let document = component::patch_document(&plan.platform, &plan.image_name);
        let component_arn = api
            .create_component(&ComponentSpec {
                name: plan.component_name.clone(),
                semantic_version: plan.component_version.clone(),
                platform: plan.platform.clone(),
                supported_os_version: plan.image_name.clone(),
                description: "Patch and validate component created by skylift".to_string(),
                data_yaml: document.to_yaml()?,
            })
            .await?;
        tracing::info!("created component {component_arn}");
        report.record("create-component", ResourceHandle::new("component", component_arn));

        let recipe_arn = api
            .create_image_recipe(&RecipeSpec {
                name: plan.recipe_name.clone(),
                semantic_version: plan.recipe_version.clone(),
                component_arn: arn::component(
                    &plan.region,
                    &plan.account_id,
                    &plan.component_name,
                    &plan.component_version,
                ),
                parent_image_arn: arn::parent_image(
                    &plan.region,
                    &plan.image_name,
                    &plan.os_version,
                ),
            })
            .await?;
        tracing::info!("created image recipe {recipe_arn}");
        report.record("create-image-recipe", ResourceHandle::new("image-recipe", recipe_arn));

        let distribution_arn = api
            .create_distribution_configuration(&plan.distribution_name, &plan.region)
            .await?;
        tracing::info!("created distribution configuration {distribution_arn}");
        report.record(
            "create-distribution-configuration",
            ResourceHandle::new("distribution-configuration", distribution_arn),
        );

        let infrastructure_arn = api
            .create_infrastructure_configuration(
                &plan.infrastructure_name,
                &plan.instance_type,
                &plan.instance_profile,
            )
            .await?;
        tracing::info!("created infrastructure configuration {infrastructure_arn}");
        report.record(
            "create-infrastructure-configuration",
            ResourceHandle::new("infrastructure-configuration", infrastructure_arn),
        );

        let pipeline_arn = api
            .create_image_pipeline(&PipelineSpec {
                name: plan.pipeline_name.clone(),
                description: "Image pipeline created by skylift".to_string(),
                image_recipe_arn: arn::image_recipe(
                    &plan.region,
                    &plan.account_id,
                    &plan.recipe_name,
                    &plan.recipe_version,
                ),
                infrastructure_configuration_arn: arn::infrastructure_configuration(
                    &plan.region,
                    &plan.account_id,
                    &plan.infrastructure_name,
                ),
                distribution_configuration_arn: arn::distribution_configuration(
                    &plan.region,
                    &plan.account_id,
                    &plan.distribution_name,
                ),
            })
            .await?;
        tracing::info!("created image pipeline {pipeline_arn}");
        report.record(
            "create-image-pipeline",
            ResourceHandle::new("image-pipeline", pipeline_arn),
        );

        let build_arn = api
            .start_image_pipeline_execution(&arn::image_pipeline(
                &plan.region,
                &plan.account_id,
                &plan.pipeline_name,
            ))
            .await?;
        tracing::info!("started pipeline execution, build {build_arn}");
        report.record(
            "start-pipeline-execution",
            ResourceHandle::new("image-build-version", build_arn),
        );

        report.duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            "image pipeline completed: {} steps in {}ms",
            report.len(),
            report.duration_ms
        );
        Ok(report)
    }
}
