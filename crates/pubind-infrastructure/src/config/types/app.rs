//! Main application configuration

use serde::{Deserialize, Serialize};

use super::{AccessorCacheConfig, DiscoveryConfig, LoggingConfig};

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Accessor cache sizing
    #[serde(default)]
    pub accessor_cache: AccessorCacheConfig,

    /// Contribution discovery
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}
