//! Configuration types

mod accessor_cache;
mod app;
mod discovery;
mod logging;

pub use accessor_cache::AccessorCacheConfig;
pub use app::AppConfig;
pub use discovery::DiscoveryConfig;
pub use logging::LoggingConfig;
