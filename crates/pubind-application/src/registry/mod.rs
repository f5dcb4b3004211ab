//! Contribution Registry
//!
//! Link-time registration of strategy contributions using `linkme`
//! distributed slices.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  1. Contributor crate: #[linkme::distributed_slice(INTEGRATORS)]
//! │                        static AUDIT: IntegratorEntry = ...    │
//! │                              ↓                                │
//! │  2. Registry declares: pub static INTEGRATORS: [Entry] = [..] │
//! │                              ↓                                │
//! │  3. LinkedServiceDiscovery instantiates every entry           │
//! │                              ↓                                │
//! │  4. Provider composition wraps them in a ContributionList     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Registering a contribution
//!
//! ```ignore
//! use pubind_application::registry::{IntegratorEntry, INTEGRATORS};
//!
//! #[linkme::distributed_slice(INTEGRATORS)]
//! static AUDIT_INTEGRATOR: IntegratorEntry = IntegratorEntry {
//!     name: "audit",
//!     description: "Writes revision rows for audited entities",
//!     factory: || Arc::new(AuditIntegrator::default()),
//! };
//! ```

pub mod integrator;
pub mod strategy;
pub mod type_contributor;

use std::fmt;
use std::sync::Arc;

use pubind_domain::ports::{
    Integrator, ServiceDiscovery, StrategyRegistrationProvider, TypeContributor,
};

pub use integrator::{INTEGRATORS, IntegratorEntry, linked_integrators, list_integrators};
pub use strategy::{
    STRATEGY_REGISTRATION_PROVIDERS, StrategyRegistrationProviderEntry,
    linked_strategy_registration_providers, list_strategy_registration_providers,
};
pub use type_contributor::{
    TYPE_CONTRIBUTORS, TypeContributorEntry, linked_type_contributors, list_type_contributors,
};

/// Service discovery over the link-time registries.
///
/// Every call instantiates fresh contributions from the entry factories.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedServiceDiscovery;

impl ServiceDiscovery for LinkedServiceDiscovery {
    fn integrators(&self) -> Vec<Arc<dyn Integrator>> {
        linked_integrators()
    }

    fn strategy_registration_providers(&self) -> Vec<Arc<dyn StrategyRegistrationProvider>> {
        linked_strategy_registration_providers()
    }

    fn type_contributors(&self) -> Vec<Arc<dyn TypeContributor>> {
        linked_type_contributors()
    }
}

/// Linked contributions by capability
#[derive(Debug, Clone)]
pub struct AvailableContributions {
    /// Integrators (name, description)
    pub integrators: Vec<(&'static str, &'static str)>,
    /// Strategy-registration providers (name, description)
    pub strategy_registration_providers: Vec<(&'static str, &'static str)>,
    /// Type contributors (name, description)
    pub type_contributors: Vec<(&'static str, &'static str)>,
}

/// List every linked contribution across all capabilities
pub fn list_contributions() -> AvailableContributions {
    AvailableContributions {
        integrators: list_integrators(),
        strategy_registration_providers: list_strategy_registration_providers(),
        type_contributors: list_type_contributors(),
    }
}

impl fmt::Display for AvailableContributions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Linked Contributions:")?;
        writeln!(f)?;

        writeln!(f, "Integrators:")?;
        for (name, desc) in &self.integrators {
            writeln!(f, "  - {name}: {desc}")?;
        }
        writeln!(f)?;

        writeln!(f, "Strategy Registration Providers:")?;
        for (name, desc) in &self.strategy_registration_providers {
            writeln!(f, "  - {name}: {desc}")?;
        }
        writeln!(f)?;

        writeln!(f, "Type Contributors:")?;
        for (name, desc) in &self.type_contributors {
            writeln!(f, "  - {name}: {desc}")?;
        }

        Ok(())
    }
}
