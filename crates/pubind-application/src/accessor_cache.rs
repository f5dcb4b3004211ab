//! Accessor Cache
//!
//! Concurrent cache from `(owner type, property name)` to resolved accessor
//! handles, with one map for getters and one for setters.
//!
//! ## Consistency
//!
//! Lookups are check-then-insert without locking. Two threads missing the
//! same cold key may both resolve and both store; the resolver is a pure
//! function of its arguments, so the handles are interchangeable and the
//! last store wins. Failed resolutions are never stored.
//!
//! ## Reclamation
//!
//! Entries live in bounded `moka` caches with idle expiry. An entry may be
//! evicted at any time and is transparently re-resolved on the next lookup;
//! the cache is never the only source of a handle.
//!
//! ```text
//! get_getter(owner, "total", Field)
//!        │
//!        ▼
//!  getters.get(key) ──hit──▶ handle
//!        │ miss
//!        ▼
//!  resolver.getter(owner, "total", Field) ──Err──▶ PropertyNotFound (not stored)
//!        │ Ok
//!        ▼
//!  getters.insert(key, handle) ──▶ handle
//! ```

use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use moka::sync::Cache;
use pubind_domain::error::{Error, Result};
use pubind_domain::ports::{Getter, PropertyAccessorResolver, Setter};
use pubind_domain::{AccessType, OwnerType, PropertyData};
use tracing::{debug, trace};

use crate::constants::{ACCESSOR_CACHE_DEFAULT_CAPACITY, ACCESSOR_CACHE_DEFAULT_IDLE_SECS};

static GLOBAL_CACHE: OnceLock<Arc<AccessorCache>> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct AccessorKey {
    owner: OwnerType,
    property_name: String,
}

impl AccessorKey {
    fn new(owner: OwnerType, property_name: &str) -> Self {
        Self {
            owner,
            property_name: property_name.to_string(),
        }
    }
}

/// Approximate number of entries held by each map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessorCacheStats {
    /// Cached getters
    pub getters: u64,
    /// Cached setters
    pub setters: u64,
}

/// Cache of resolved getters and setters
pub struct AccessorCache {
    resolver: Arc<dyn PropertyAccessorResolver>,
    getters: Cache<AccessorKey, Arc<dyn Getter>>,
    setters: Cache<AccessorKey, Arc<dyn Setter>>,
}

// Construction
impl AccessorCache {
    /// Create a cache with the default capacity and idle expiry
    pub fn new(resolver: Arc<dyn PropertyAccessorResolver>) -> Self {
        Self::with_config(
            resolver,
            ACCESSOR_CACHE_DEFAULT_CAPACITY,
            Some(Duration::from_secs(ACCESSOR_CACHE_DEFAULT_IDLE_SECS)),
        )
    }

    /// Create a cache holding at most `max_capacity` entries per map.
    ///
    /// With `time_to_idle` set, entries not read for that long may be
    /// reclaimed.
    pub fn with_config(
        resolver: Arc<dyn PropertyAccessorResolver>,
        max_capacity: u64,
        time_to_idle: Option<Duration>,
    ) -> Self {
        Self {
            resolver,
            getters: build_map(max_capacity, time_to_idle),
            setters: build_map(max_capacity, time_to_idle),
        }
    }

    /// Install the process-wide cache.
    ///
    /// Fails with `Error::Internal` if a cache was already installed; the
    /// installed cache is kept.
    pub fn install_global(cache: Arc<AccessorCache>) -> Result<Arc<AccessorCache>> {
        let mut installed = false;
        let global = GLOBAL_CACHE.get_or_init(|| {
            installed = true;
            cache
        });
        if installed {
            debug!(cache = ?global, "Installed process-wide accessor cache");
            Ok(Arc::clone(global))
        } else {
            Err(Error::internal("Global accessor cache is already installed"))
        }
    }

    /// The process-wide cache, if one was installed
    pub fn global() -> Option<Arc<AccessorCache>> {
        GLOBAL_CACHE.get().cloned()
    }
}

fn build_map<V>(max_capacity: u64, time_to_idle: Option<Duration>) -> Cache<AccessorKey, V>
where
    V: Clone + Send + Sync + 'static,
{
    let builder = Cache::builder().max_capacity(max_capacity);
    match time_to_idle {
        Some(idle) => builder.time_to_idle(idle).build(),
        None => builder.build(),
    }
}

fn validate_property_name(owner: OwnerType, property_name: &str) -> Result<()> {
    if property_name.is_empty() {
        return Err(Error::invalid_argument(format!(
            "Property name must not be empty (owner: {owner})"
        )));
    }
    Ok(())
}

// Getter lookups
impl AccessorCache {
    /// Getter for `property_name` on `owner`, resolved with `access_type` on a miss
    pub fn get_getter(
        &self,
        owner: OwnerType,
        property_name: &str,
        access_type: AccessType,
    ) -> Result<Arc<dyn Getter>> {
        validate_property_name(owner, property_name)?;
        let key = AccessorKey::new(owner, property_name);

        if let Some(getter) = self.getters.get(&key) {
            trace!(owner = %owner, property = property_name, "Getter cache hit");
            return Ok(getter);
        }

        debug!(owner = %owner, property = property_name, access_type = %access_type, "Resolving getter");
        let getter = self.resolver.getter(owner, property_name, access_type)?;
        // Racing resolutions of the same key are equivalent; last insert wins.
        self.getters.insert(key, Arc::clone(&getter));
        Ok(getter)
    }

    /// Getter for the member and access strategy carried by `property`
    pub fn get_getter_for(&self, owner: OwnerType, property: &PropertyData) -> Result<Arc<dyn Getter>> {
        self.get_getter(owner, property.bean_name(), property.access_type())
    }

    /// Getter lookup with a textual access tag (`"field"` or `"property"`)
    pub fn get_getter_by_tag(
        &self,
        owner: OwnerType,
        property_name: &str,
        access_tag: &str,
    ) -> Result<Arc<dyn Getter>> {
        let access_type = access_tag.parse()?;
        self.get_getter(owner, property_name, access_type)
    }
}

// Setter lookups
impl AccessorCache {
    /// Setter for `property_name` on `owner`, resolved with `access_type` on a miss
    pub fn get_setter(
        &self,
        owner: OwnerType,
        property_name: &str,
        access_type: AccessType,
    ) -> Result<Arc<dyn Setter>> {
        validate_property_name(owner, property_name)?;
        let key = AccessorKey::new(owner, property_name);

        if let Some(setter) = self.setters.get(&key) {
            trace!(owner = %owner, property = property_name, "Setter cache hit");
            return Ok(setter);
        }

        debug!(owner = %owner, property = property_name, access_type = %access_type, "Resolving setter");
        let setter = self.resolver.setter(owner, property_name, access_type)?;
        self.setters.insert(key, Arc::clone(&setter));
        Ok(setter)
    }

    /// Setter for the member and access strategy carried by `property`
    pub fn get_setter_for(&self, owner: OwnerType, property: &PropertyData) -> Result<Arc<dyn Setter>> {
        self.get_setter(owner, property.bean_name(), property.access_type())
    }

    /// Setter lookup with a textual access tag (`"field"` or `"property"`)
    pub fn get_setter_by_tag(
        &self,
        owner: OwnerType,
        property_name: &str,
        access_tag: &str,
    ) -> Result<Arc<dyn Setter>> {
        let access_type = access_tag.parse()?;
        self.get_setter(owner, property_name, access_type)
    }
}

// Diagnostics
impl AccessorCache {
    /// Entry counts after applying pending evictions
    pub fn stats(&self) -> AccessorCacheStats {
        self.getters.run_pending_tasks();
        self.setters.run_pending_tasks();
        AccessorCacheStats {
            getters: self.getters.entry_count(),
            setters: self.setters.entry_count(),
        }
    }
}

impl fmt::Debug for AccessorCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessorCache")
            .field("getters", &self.getters.entry_count())
            .field("setters", &self.setters.entry_count())
            .finish_non_exhaustive()
    }
}
