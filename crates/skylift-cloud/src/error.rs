//! Cloud provisioning error types

use thiserror::Error;

/// Cloud provisioning errors
///
/// Every provider call failure surfaces as [`CloudError::Api`]; there is no
/// retry and no compensation of already-created resources. The lookup
/// variants come out of the identifier resolver, which requires a filter to
/// match exactly one resource.
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("{op} failed: {message}")]
    Api { op: &'static str, message: String },

    #[error("no {what} matched filter `{filter}`")]
    LookupMiss { what: &'static str, filter: String },

    #[error("{count} {what} matched filter `{filter}`, expected exactly one")]
    LookupAmbiguity {
        what: &'static str,
        filter: String,
        count: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CloudError {
    /// Build an API failure for the named provider operation, logging the
    /// full context at the point of failure before it propagates.
    pub fn api(op: &'static str, err: impl std::fmt::Display) -> Self {
        tracing::error!("{op} failed: {err}");
        Self::Api {
            op,
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;
