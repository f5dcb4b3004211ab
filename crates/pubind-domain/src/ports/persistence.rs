//! Persistence-Unit Builder Ports
//!
//! The bootstrapping algorithm itself is external; this crate only hands
//! it a finalized settings map and a resolution scope.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::ports::boundary::TypeResolver;
use crate::settings::Settings;

/// Descriptor of a container-managed persistence unit
pub trait PersistenceUnitInfo: Send + Sync + fmt::Debug {
    /// Unit name
    fn unit_name(&self) -> &str;

    /// Type resolver the unit's types were loaded with
    fn type_resolver(&self) -> Arc<dyn TypeResolver>;
}

/// A built persistence unit
pub trait PersistenceUnitFactory: Send + Sync + fmt::Debug {
    /// Name of the unit this factory serves
    fn unit_name(&self) -> &str;
}

/// Builds persistence units from finalized settings.
///
/// Failures are reported as `Error::Builder` and are propagated without
/// interpretation.
pub trait PersistenceUnitBuilder: Send + Sync {
    /// Build the named unit; `Ok(None)` when the builder does not know it
    fn build_named(
        &self,
        unit_name: &str,
        settings: Settings,
        resolver: Arc<dyn TypeResolver>,
    ) -> Result<Option<Arc<dyn PersistenceUnitFactory>>>;

    /// Build a container-managed unit from its descriptor
    fn build_container(
        &self,
        info: &dyn PersistenceUnitInfo,
        settings: Settings,
        resolver: Arc<dyn TypeResolver>,
    ) -> Result<Arc<dyn PersistenceUnitFactory>>;
}
