//! Type Contributor Registry

use std::sync::Arc;

use pubind_domain::ports::TypeContributor;

/// Registry entry for a type contributor
pub struct TypeContributorEntry {
    /// Unique contributor name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Creates the contributor instance
    pub factory: fn() -> Arc<dyn TypeContributor>,
}

#[linkme::distributed_slice]
pub static TYPE_CONTRIBUTORS: [TypeContributorEntry] = [..];

/// Instantiate every linked type contributor in link order
pub fn linked_type_contributors() -> Vec<Arc<dyn TypeContributor>> {
    TYPE_CONTRIBUTORS
        .iter()
        .map(|entry| (entry.factory)())
        .collect()
}

/// List all linked type contributors
pub fn list_type_contributors() -> Vec<(&'static str, &'static str)> {
    TYPE_CONTRIBUTORS
        .iter()
        .map(|entry| (entry.name, entry.description))
        .collect()
}
