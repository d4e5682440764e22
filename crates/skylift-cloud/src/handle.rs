//! Opaque handles to provider-side resources

use serde::Serialize;

/// Identifier of a resource that lives on the provider side.
///
/// A handle is produced by a create step, consumed by later attach or
/// dependent-create steps, and discarded when the run ends. No state is
/// persisted locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceHandle {
    /// Resource kind label (e.g. "vpc", "subnet", "image-recipe")
    pub kind: &'static str,

    /// Provider-issued identifier (id or ARN)
    pub id: String,
}

impl ResourceHandle {
    pub fn new(kind: &'static str, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl std::fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}
