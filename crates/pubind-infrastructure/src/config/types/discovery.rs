//! Contribution discovery configuration

use serde::{Deserialize, Serialize};

/// Controls which contributions the service registry reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Append contributions registered at link time after runtime ones
    pub include_linked: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            include_linked: true,
        }
    }
}
