//! Strategy Contribution Ports
//!
//! Capabilities that externally registered services contribute to a
//! persistence-unit build, and the discovery collaborator that enumerates
//! them.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::settings::Settings;
use crate::value_objects::OwnerType;

/// Hooks into the build of a persistence unit
pub trait Integrator: Send + Sync + fmt::Debug {
    /// Name used in diagnostics
    fn name(&self) -> &str;

    /// Called by the builder with the finalized settings
    fn integrate(&self, settings: &Settings) -> Result<()>;
}

/// A named strategy implementation made selectable by short names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyRegistration {
    /// Role the strategy plays (e.g. "transaction-coordinator")
    pub strategy_role: String,
    /// Implementation identifier
    pub implementation: String,
    /// Short names that select this implementation
    pub selector_names: Vec<String>,
}

impl StrategyRegistration {
    /// Create a registration
    pub fn new<R: Into<String>, I: Into<String>>(
        strategy_role: R,
        implementation: I,
        selector_names: Vec<String>,
    ) -> Self {
        Self {
            strategy_role: strategy_role.into(),
            implementation: implementation.into(),
            selector_names,
        }
    }
}

/// Supplies strategy registrations
pub trait StrategyRegistrationProvider: Send + Sync + fmt::Debug {
    /// Registrations this provider contributes
    fn strategy_registrations(&self) -> Vec<StrategyRegistration>;
}

/// Type registrations collected from type contributors
#[derive(Debug, Clone, Default)]
pub struct TypeContributions {
    registrations: Vec<(String, OwnerType)>,
}

impl TypeContributions {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `owner` under `name`; later registrations override earlier ones
    pub fn contribute_type<S: Into<String>>(&mut self, name: S, owner: OwnerType) {
        self.registrations.push((name.into(), owner));
    }

    /// Resolve the most recent registration for `name`
    pub fn resolve(&self, name: &str) -> Option<OwnerType> {
        self.registrations
            .iter()
            .rev()
            .find(|(registered, _)| registered == name)
            .map(|(_, owner)| *owner)
    }

    /// All registrations in contribution order
    pub fn registrations(&self) -> &[(String, OwnerType)] {
        &self.registrations
    }
}

/// Contributes custom value types
pub trait TypeContributor: Send + Sync + fmt::Debug {
    /// Register types into `contributions`
    fn contribute(&self, contributions: &mut TypeContributions);
}

/// Transaction coordination object of the hosting runtime
pub trait TransactionPlatform: Send + Sync + fmt::Debug {
    /// Platform name used in diagnostics
    fn platform_name(&self) -> &str;

    /// Whether transaction synchronizations can be registered
    fn can_register_synchronization(&self) -> bool;
}

/// Enumerates the currently visible implementations of each capability.
///
/// Every call returns a fresh ordered snapshot; absence is an empty list,
/// never an error.
pub trait ServiceDiscovery: Send + Sync {
    /// Visible integrators
    fn integrators(&self) -> Vec<Arc<dyn Integrator>>;

    /// Visible strategy-registration providers
    fn strategy_registration_providers(&self) -> Vec<Arc<dyn StrategyRegistrationProvider>>;

    /// Visible type contributors
    fn type_contributors(&self) -> Vec<Arc<dyn TypeContributor>>;
}
