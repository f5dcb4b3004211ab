//! # Application Layer
//!
//! The three mechanisms pubind provides on top of the domain ports:
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`accessor_cache`] | Concurrent getter/setter cache with reclaimable entries |
//! | [`provider`] | Settings composition and bundle-scoped persistence-unit builds |
//! | [`ambient`] | Thread-local type-resolution context with guaranteed restoration |
//! | [`registry`] | Link-time contribution registries |
//! | [`boundary`] | Bundle-backed type resolver and scanner |
//! | [`reflection`] | Declared-property lookup and name-based type loading |

pub mod accessor_cache;
pub mod ambient;
pub mod boundary;
pub mod constants;
pub mod provider;
pub mod reflection;
pub mod registry;

pub use accessor_cache::{AccessorCache, AccessorCacheStats};
pub use ambient::{ContextGuard, with_boundary};
pub use boundary::{BundleScanner, BundleTypeResolver};
pub use provider::{BundlePersistenceProvider, BundlePersistenceProviderService};
pub use registry::LinkedServiceDiscovery;
