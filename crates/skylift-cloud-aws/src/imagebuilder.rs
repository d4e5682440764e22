//! Image Builder SDK adapter
//!
//! Wraps the official Image Builder client behind [`ImageBuilderApi`]. The
//! fixed request shapes (single AMI distribution, image tests enabled with a
//! 60 minute timeout, terminate-on-failure infrastructure) live here; the
//! pipeline driver only supplies names and ARNs.

use crate::api::{ComponentSpec, ImageBuilderApi, PipelineSpec, RecipeSpec};
use async_trait::async_trait;
use aws_sdk_imagebuilder::types::{
    AdditionalInstanceConfiguration, AmiDistributionConfiguration, ComponentConfiguration,
    Distribution, ImageTestsConfiguration, PipelineStatus, Platform, SystemsManagerAgent,
};
use skylift_cloud::{CloudError, Result};

/// Image Builder adapter over the official SDK client
pub struct SdkImageBuilder {
    client: aws_sdk_imagebuilder::Client,
}

impl SdkImageBuilder {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_imagebuilder::Client::new(config),
        }
    }
}

#[async_trait]
impl ImageBuilderApi for SdkImageBuilder {
    async fn create_component(&self, spec: &ComponentSpec) -> Result<String> {
        let out = self
            .client
            .create_component()
            .name(&spec.name)
            .semantic_version(&spec.semantic_version)
            .description(&spec.description)
            .platform(Platform::from(spec.platform.as_str()))
            .supported_os_versions(&spec.supported_os_version)
            .data(&spec.data_yaml)
            .send()
            .await
            .map_err(|e| CloudError::api("CreateComponent", e))?;

        out.component_build_version_arn()
            .map(str::to_owned)
            .ok_or_else(|| {
                CloudError::api("CreateComponent", "response missing componentBuildVersionArn")
            })
    }

    async fn create_image_recipe(&self, spec: &RecipeSpec) -> Result<String> {
        let component = ComponentConfiguration::builder()
            .component_arn(&spec.component_arn)
            .build()
            .map_err(|e| CloudError::InvalidConfig(format!("component configuration: {e}")))?;

        // Systems Manager agent is only needed during the build; strip it
        // from the produced image.
        let instance_config = AdditionalInstanceConfiguration::builder()
            .systems_manager_agent(
                SystemsManagerAgent::builder()
                    .uninstall_after_build(true)
                    .build(),
            )
            .build();

        let out = self
            .client
            .create_image_recipe()
            .name(&spec.name)
            .semantic_version(&spec.semantic_version)
            .components(component)
            .parent_image(&spec.parent_image_arn)
            .additional_instance_configuration(instance_config)
            .send()
            .await
            .map_err(|e| CloudError::api("CreateImageRecipe", e))?;

        out.image_recipe_arn()
            .map(str::to_owned)
            .ok_or_else(|| CloudError::api("CreateImageRecipe", "response missing imageRecipeArn"))
    }

    async fn create_distribution_configuration(
        &self,
        name: &str,
        region: &str,
    ) -> Result<String> {
        let distribution = Distribution::builder()
            .region(region)
            .ami_distribution_configuration(
                AmiDistributionConfiguration::builder()
                    .name("skylift-{{imagebuilder:buildDate}}")
                    .build(),
            )
            .build()
            .map_err(|e| CloudError::InvalidConfig(format!("distribution: {e}")))?;

        let out = self
            .client
            .create_distribution_configuration()
            .name(name)
            .distributions(distribution)
            .send()
            .await
            .map_err(|e| CloudError::api("CreateDistributionConfiguration", e))?;

        out.distribution_configuration_arn()
            .map(str::to_owned)
            .ok_or_else(|| {
                CloudError::api(
                    "CreateDistributionConfiguration",
                    "response missing distributionConfigurationArn",
                )
            })
    }

    async fn create_infrastructure_configuration(
        &self,
        name: &str,
        instance_type: &str,
        instance_profile: &str,
    ) -> Result<String> {
        let out = self
            .client
            .create_infrastructure_configuration()
            .name(name)
            .instance_types(instance_type)
            .instance_profile_name(instance_profile)
            .terminate_instance_on_failure(true)
            .send()
            .await
            .map_err(|e| CloudError::api("CreateInfrastructureConfiguration", e))?;

        out.infrastructure_configuration_arn()
            .map(str::to_owned)
            .ok_or_else(|| {
                CloudError::api(
                    "CreateInfrastructureConfiguration",
                    "response missing infrastructureConfigurationArn",
                )
            })
    }

    async fn create_image_pipeline(&self, spec: &PipelineSpec) -> Result<String> {
        let out = self
            .client
            .create_image_pipeline()
            .name(&spec.name)
            .description(&spec.description)
            .image_recipe_arn(&spec.image_recipe_arn)
            .infrastructure_configuration_arn(&spec.infrastructure_configuration_arn)
            .distribution_configuration_arn(&spec.distribution_configuration_arn)
            .image_tests_configuration(
                ImageTestsConfiguration::builder()
                    .image_tests_enabled(true)
                    .timeout_minutes(60)
                    .build(),
            )
            .status(PipelineStatus::Enabled)
            .send()
            .await
            .map_err(|e| CloudError::api("CreateImagePipeline", e))?;

        out.image_pipeline_arn()
            .map(str::to_owned)
            .ok_or_else(|| {
                CloudError::api("CreateImagePipeline", "response missing imagePipelineArn")
            })
    }

    async fn start_image_pipeline_execution(&self, pipeline_arn: &str) -> Result<String> {
        let out = self
            .client
            .start_image_pipeline_execution()
            .image_pipeline_arn(pipeline_arn)
            .send()
            .await
            .map_err(|e| CloudError::api("StartImagePipelineExecution", e))?;

        out.image_build_version_arn()
            .map(str::to_owned)
            .ok_or_else(|| {
                CloudError::api(
                    "StartImagePipelineExecution",
                    "response missing imageBuildVersionArn",
                )
            })
    }
}
