//! AWS provisioning pipelines for skylift
//!
//! This crate implements the two skylift provisioning scenarios against AWS:
//!
//! - **Network/compute**: an EC2 instance plus the default VPC, a security
//!   group, an internet gateway, a subnet, a network interface and a route
//!   table, finished by two attachments (gateway to VPC, interface to
//!   instance).
//! - **Image pipeline**: an Image Builder component, recipe, distribution
//!   and infrastructure configuration, the pipeline that ties them together,
//!   and a first pipeline execution.
//!
//! Both pipelines are flat, fail-fast call sequences. The AWS API is reached
//! through the [`Ec2Api`] and [`ImageBuilderApi`] traits so tests can
//! substitute a fake without touching pipeline logic; [`SdkEc2`] and
//! [`SdkImageBuilder`] are the real adapters over the official SDK clients.
//!
//! # Example
//!
//! ```ignore
//! use skylift_cloud_aws::{AwsConfig, NetworkPipeline, NetworkPlan, SdkEc2};
//!
//! let config = AwsConfig {
//!     region: "us-east-1".into(),
//!     access_key: access_key,
//!     secret_access_key: secret,
//! };
//! let ec2 = SdkEc2::new(&config.load().await);
//!
//! let report = NetworkPipeline::new(plan).run(&ec2).await?;
//! for step in &report.steps {
//!     println!("{}", step.step);
//! }
//! ```
//!
//! Calls are not idempotent: re-running a pipeline creates duplicate
//! resources unless AWS itself rejects the duplicate (as it does for a
//! second default VPC or a reused security group name).

pub mod api;
pub mod arn;
pub mod component;
pub mod config;
pub mod ec2;
pub mod image_pipeline;
pub mod imagebuilder;
pub mod network;

pub use api::{
    ComponentSpec, Ec2Api, ImageBuilderApi, InstanceSpec, PipelineSpec, RecipeSpec,
};
pub use component::{patch_commands, patch_document, ComponentDocument, PatchCommands};
pub use config::AwsConfig;
pub use ec2::SdkEc2;
pub use image_pipeline::{ImagePipeline, ImagePlan};
pub use imagebuilder::SdkImageBuilder;
pub use network::{NetworkPipeline, NetworkPlan};
