//! skylift cloud provisioning abstraction
//!
//! This crate provides the provider-neutral pieces shared by every skylift
//! provisioning pipeline: opaque resource handles, the per-run step report,
//! the identifier-resolver core, and the error taxonomy.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  skylift CLI                     │
//! │         (skylift network / image-pipeline)       │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               skylift-cloud                      │
//! │   ResourceHandle / RunReport / single_match      │
//! │   CloudError (fail-fast, no retry, no rollback)  │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │             skylift-cloud-aws                    │
//! │   Ec2Api / ImageBuilderApi + pipeline drivers    │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! Pipelines here are deliberately linear: every operation runs exactly once,
//! in program order, and the first failure aborts the run. Nothing created
//! before the failure is rolled back.

pub mod error;
pub mod handle;
pub mod report;
pub mod resolve;

// Re-exports
pub use error::{CloudError, Result};
pub use handle::ResourceHandle;
pub use report::{RunReport, StepRecord};
pub use resolve::single_match;
