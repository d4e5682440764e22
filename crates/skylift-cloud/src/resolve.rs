//! Identifier resolution core
//!
//! Provisioning steps frequently need the id of a resource that already
//! exists on the provider side ("the default VPC", "the security group named
//! X"). The provider answers such queries with a list; [`single_match`] turns
//! that list into a usable identifier.
//!
//! The list must contain exactly one element. An empty list is a
//! [`CloudError::LookupMiss`]; more than one element is a
//! [`CloudError::LookupAmbiguity`] rather than an arbitrary first-listed
//! pick, so a filter that silently started matching twice fails loudly
//! instead of provisioning against the wrong resource.
//!
//! Resolution is never cached: callers re-query the provider on every
//! resolve, even for the same logical resource within one run.

use crate::error::{CloudError, Result};

/// Reduce a provider lookup result to its single matching element.
pub fn single_match<T>(
    mut items: Vec<T>,
    what: &'static str,
    filter: impl Into<String>,
) -> Result<T> {
    match items.len() {
        1 => Ok(items.remove(0)),
        0 => Err(CloudError::LookupMiss {
            what,
            filter: filter.into(),
        }),
        count => Err(CloudError::LookupAmbiguity {
            what,
            filter: filter.into(),
            count,
        }),
    }
}
