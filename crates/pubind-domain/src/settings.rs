//! Persistence-unit settings map
//!
//! Caller configuration arrives as plain JSON values; the provider
//! composition adds typed entries under the keys in [`crate::constants`].

use std::collections::HashMap;
use std::sync::Arc;

use crate::ports::{
    Integrator, Scanner, StrategyRegistrationProvider, TransactionPlatform, TypeContributor,
};
use crate::value_objects::ContributionList;

/// Settings handed to a persistence-unit builder
pub type Settings = HashMap<String, SettingValue>;

/// One settings entry
#[derive(Debug, Clone)]
pub enum SettingValue {
    /// Caller-supplied configuration, passed through unchanged
    Value(serde_json::Value),
    /// Transaction-platform bridge
    TransactionPlatform(Arc<dyn TransactionPlatform>),
    /// Deferred integrator list
    Integrators(ContributionList<dyn Integrator>),
    /// Deferred strategy-registration provider list
    StrategyRegistrationProviders(ContributionList<dyn StrategyRegistrationProvider>),
    /// Deferred type contributor list
    TypeContributors(ContributionList<dyn TypeContributor>),
    /// Resource scanner bound to a resolution scope
    Scanner(Arc<dyn Scanner>),
}

impl SettingValue {
    /// Plain configuration value, if this is one
    pub fn as_value(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Plain string value, if this is one
    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(serde_json::Value::as_str)
    }

    /// Transaction platform, if this is one
    pub fn as_transaction_platform(&self) -> Option<&Arc<dyn TransactionPlatform>> {
        match self {
            Self::TransactionPlatform(platform) => Some(platform),
            _ => None,
        }
    }

    /// Integrator list, if this is one
    pub fn as_integrators(&self) -> Option<&ContributionList<dyn Integrator>> {
        match self {
            Self::Integrators(list) => Some(list),
            _ => None,
        }
    }

    /// Strategy-registration provider list, if this is one
    pub fn as_strategy_registration_providers(
        &self,
    ) -> Option<&ContributionList<dyn StrategyRegistrationProvider>> {
        match self {
            Self::StrategyRegistrationProviders(list) => Some(list),
            _ => None,
        }
    }

    /// Type contributor list, if this is one
    pub fn as_type_contributors(&self) -> Option<&ContributionList<dyn TypeContributor>> {
        match self {
            Self::TypeContributors(list) => Some(list),
            _ => None,
        }
    }

    /// Scanner, if this is one
    pub fn as_scanner(&self) -> Option<&Arc<dyn Scanner>> {
        match self {
            Self::Scanner(scanner) => Some(scanner),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for SettingValue {
    fn from(value: serde_json::Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::Value(serde_json::Value::String(value.to_string()))
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        Self::Value(serde_json::Value::String(value))
    }
}

/// Build settings from plain configuration pairs
pub fn settings_from_values<K, V, I>(values: I) -> Settings
where
    K: Into<String>,
    V: Into<serde_json::Value>,
    I: IntoIterator<Item = (K, V)>,
{
    values
        .into_iter()
        .map(|(key, value)| (key.into(), SettingValue::Value(value.into())))
        .collect()
}
