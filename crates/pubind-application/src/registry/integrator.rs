//! Integrator Registry
//!
//! Integrators register themselves into [`INTEGRATORS`] at link time.

use std::sync::Arc;

use pubind_domain::ports::Integrator;

/// Registry entry for an integrator
pub struct IntegratorEntry {
    /// Unique integrator name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Creates the integrator instance
    pub factory: fn() -> Arc<dyn Integrator>,
}

#[linkme::distributed_slice]
pub static INTEGRATORS: [IntegratorEntry] = [..];

/// Instantiate every linked integrator in link order
pub fn linked_integrators() -> Vec<Arc<dyn Integrator>> {
    INTEGRATORS.iter().map(|entry| (entry.factory)()).collect()
}

/// List all linked integrators as (name, description) pairs
pub fn list_integrators() -> Vec<(&'static str, &'static str)> {
    INTEGRATORS
        .iter()
        .map(|entry| (entry.name, entry.description))
        .collect()
}
