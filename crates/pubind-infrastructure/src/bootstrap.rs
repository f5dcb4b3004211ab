//! Composition root
//!
//! Wires configuration, the metadata-backed accessor cache, the service
//! registry and the persistence provider service into one [`AppContext`].
//!
//! ```text
//! AppConfig ──► AccessorCache ◄── MetadataAccessorResolver ◄── TypeMetadataRegistry
//!     │
//!     └──────► ServiceRegistry (+ linked contributions)
//!                     │
//! TransactionPlatform ┼──► BundlePersistenceProviderService ──► provider_for(bundle)
//! PersistenceUnitBuilder
//! ```
//!
//! ```rust,ignore
//! let config = ConfigLoader::new().load()?;
//! let context = init_context(config, platform, builder)?;
//! context.metadata().register_type::<Order, _>(|t| t.field("total", |o| o.total, |o, v| o.total = v));
//! let provider = context.provider_service().provider_for(bundle);
//! let factory = provider.create_persistence_unit("orders", None)?;
//! ```

use std::fmt;
use std::sync::Arc;

use pubind_application::{AccessorCache, BundlePersistenceProviderService};
use pubind_domain::error::Result;
use pubind_domain::ports::{PersistenceUnitBuilder, ServiceDiscovery, TransactionPlatform};
use tracing::info;

use crate::config::AppConfig;
use crate::config::loader::validate_app_config;
use crate::metadata::{MetadataAccessorResolver, TypeMetadataRegistry};
use crate::services::ServiceRegistry;

/// Application context holding the wired components
pub struct AppContext {
    /// Application configuration
    pub config: Arc<AppConfig>,

    metadata: Arc<TypeMetadataRegistry>,
    accessor_cache: Arc<AccessorCache>,
    services: Arc<ServiceRegistry>,
    provider_service: BundlePersistenceProviderService,
}

impl AppContext {
    /// Type metadata backing the accessor cache
    pub fn metadata(&self) -> &Arc<TypeMetadataRegistry> {
        &self.metadata
    }

    /// Getter and setter cache
    pub fn accessor_cache(&self) -> &Arc<AccessorCache> {
        &self.accessor_cache
    }

    /// Runtime contribution registry
    pub fn services(&self) -> &Arc<ServiceRegistry> {
        &self.services
    }

    /// Hands out per-bundle persistence providers
    pub fn provider_service(&self) -> &BundlePersistenceProviderService {
        &self.provider_service
    }
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .field("metadata", &self.metadata)
            .field("accessor_cache", &self.accessor_cache)
            .field("services", &self.services)
            .finish_non_exhaustive()
    }
}

/// Build the application context from validated configuration.
///
/// With `accessor_cache.install_global` set, the cache becomes the
/// process-wide instance returned by `AccessorCache::global()`; a second
/// such bootstrap in one process fails with `Error::Internal`.
pub fn init_context(
    config: AppConfig,
    transaction_platform: Arc<dyn TransactionPlatform>,
    builder: Arc<dyn PersistenceUnitBuilder>,
) -> Result<AppContext> {
    validate_app_config(&config)?;

    let metadata = Arc::new(TypeMetadataRegistry::new());
    let resolver = Arc::new(MetadataAccessorResolver::new(Arc::clone(&metadata)));
    let accessor_cache = Arc::new(AccessorCache::with_config(
        resolver,
        config.accessor_cache.max_capacity,
        config.accessor_cache.time_to_idle(),
    ));
    if config.accessor_cache.install_global {
        AccessorCache::install_global(Arc::clone(&accessor_cache))?;
    }

    let services = Arc::new(ServiceRegistry::new(config.discovery.include_linked));
    let discovery: Arc<dyn ServiceDiscovery> = Arc::clone(&services) as Arc<dyn ServiceDiscovery>;
    let provider_service =
        BundlePersistenceProviderService::new(Arc::clone(&transaction_platform), discovery, builder);

    info!(
        transaction_platform = transaction_platform.platform_name(),
        accessor_cache_capacity = config.accessor_cache.max_capacity,
        accessor_cache_global = config.accessor_cache.install_global,
        include_linked = config.discovery.include_linked,
        "Application context initialized"
    );

    Ok(AppContext {
        config: Arc::new(config),
        metadata,
        accessor_cache,
        services,
        provider_service,
    })
}
