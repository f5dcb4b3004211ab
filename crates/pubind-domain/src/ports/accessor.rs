//! Property Accessor Ports
//!
//! Contracts for the reflective accessor handles and for the collaborator
//! that resolves them from type metadata.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::value_objects::{AccessType, OwnerType, PropertyValue};

/// Read accessor for one property of one owner type.
///
/// Handles are immutable once built and interchangeable: two handles
/// resolved for the same `(owner, property, access type)` read the same
/// value from the same instance.
pub trait Getter: Send + Sync + fmt::Debug {
    /// Read the property from `owner`.
    ///
    /// Fails with `InvalidArgument` when `owner` is not an instance of the
    /// type the handle was resolved for.
    fn get(&self, owner: &dyn Any) -> Result<PropertyValue>;

    /// Member name the handle reads
    fn property_name(&self) -> &str;

    /// Strategy the handle was resolved with
    fn access_type(&self) -> AccessType;
}

/// Write accessor for one property of one owner type
pub trait Setter: Send + Sync + fmt::Debug {
    /// Write `value` into the property of `owner`
    fn set(&self, owner: &mut dyn Any, value: PropertyValue) -> Result<()>;

    /// Member name the handle writes
    fn property_name(&self) -> &str;

    /// Strategy the handle was resolved with
    fn access_type(&self) -> AccessType;
}

/// Resolves accessor handles from type metadata.
///
/// Resolution must be a pure function of its arguments; the accessor
/// cache relies on this to tolerate duplicate resolution under races.
/// Absence is reported as `Error::PropertyNotFound`.
pub trait PropertyAccessorResolver: Send + Sync {
    /// Resolve a read accessor
    fn getter(
        &self,
        owner: OwnerType,
        property_name: &str,
        access_type: AccessType,
    ) -> Result<Arc<dyn Getter>>;

    /// Resolve a write accessor
    fn setter(
        &self,
        owner: OwnerType,
        property_name: &str,
        access_type: AccessType,
    ) -> Result<Arc<dyn Setter>>;
}

/// A property declared by an owner type under one access strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredProperty {
    /// Member name
    pub name: String,
    /// Strategy the member is declared under
    pub access_type: AccessType,
    /// Whether a setter is available
    pub writable: bool,
}

/// Enumerates the properties an owner type declares
pub trait PropertyMetadataSource: Send + Sync {
    /// Properties of `owner` declared under `access_type`, in declaration order
    fn declared_properties(&self, owner: OwnerType, access_type: AccessType)
    -> Vec<DeclaredProperty>;
}
