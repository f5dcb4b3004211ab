//! Accessor cache configuration

use std::time::Duration;

use pubind_application::constants::{
    ACCESSOR_CACHE_DEFAULT_CAPACITY, ACCESSOR_CACHE_DEFAULT_IDLE_SECS,
};
use serde::{Deserialize, Serialize};

/// Sizing of the getter and setter maps.
///
/// Entries are reclaimable: the least recently used ones are evicted once
/// `max_capacity` is reached, and any entry idle for `time_to_idle_secs`
/// is dropped. A zero idle time disables idle expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessorCacheConfig {
    /// Maximum entries per map
    pub max_capacity: u64,

    /// Idle time before an entry may be reclaimed (seconds)
    pub time_to_idle_secs: u64,

    /// Install the cache as the process-wide instance on bootstrap
    pub install_global: bool,
}

impl AccessorCacheConfig {
    /// Idle expiry, `None` when disabled
    pub fn time_to_idle(&self) -> Option<Duration> {
        (self.time_to_idle_secs > 0).then(|| Duration::from_secs(self.time_to_idle_secs))
    }
}

impl Default for AccessorCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: ACCESSOR_CACHE_DEFAULT_CAPACITY,
            time_to_idle_secs: ACCESSOR_CACHE_DEFAULT_IDLE_SECS,
            install_global: true,
        }
    }
}
