//! Strategy-Registration Provider Registry

use std::sync::Arc;

use pubind_domain::ports::StrategyRegistrationProvider;

/// Registry entry for a strategy-registration provider
pub struct StrategyRegistrationProviderEntry {
    /// Unique provider name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Creates the provider instance
    pub factory: fn() -> Arc<dyn StrategyRegistrationProvider>,
}

#[linkme::distributed_slice]
pub static STRATEGY_REGISTRATION_PROVIDERS: [StrategyRegistrationProviderEntry] = [..];

/// Instantiate every linked strategy-registration provider in link order
pub fn linked_strategy_registration_providers() -> Vec<Arc<dyn StrategyRegistrationProvider>> {
    STRATEGY_REGISTRATION_PROVIDERS
        .iter()
        .map(|entry| (entry.factory)())
        .collect()
}

/// List all linked strategy-registration providers
pub fn list_strategy_registration_providers() -> Vec<(&'static str, &'static str)> {
    STRATEGY_REGISTRATION_PROVIDERS
        .iter()
        .map(|entry| (entry.name, entry.description))
        .collect()
}
