//! Reflection helpers
//!
//! Declared-property lookup over a [`PropertyMetadataSource`] and name-based
//! type loading through an explicit or ambient [`TypeResolver`].

use pubind_domain::error::{Error, Result};
use pubind_domain::ports::{DeclaredProperty, PropertyMetadataSource, TypeResolver};
use pubind_domain::{AccessType, OwnerType};
use tracing::debug;

use crate::ambient;

/// Find a declared property trying field access first, then property access
pub fn find_property(
    metadata: &dyn PropertyMetadataSource,
    owner: OwnerType,
    property_name: &str,
) -> Option<DeclaredProperty> {
    AccessType::ALL
        .into_iter()
        .find_map(|access_type| find_property_with(metadata, owner, property_name, access_type))
}

/// Find a property declared under exactly `access_type`
pub fn find_property_with(
    metadata: &dyn PropertyMetadataSource,
    owner: OwnerType,
    property_name: &str,
    access_type: AccessType,
) -> Option<DeclaredProperty> {
    metadata
        .declared_properties(owner, access_type)
        .into_iter()
        .find(|property| property.name == property_name)
}

/// Resolve a type by name.
///
/// Uses `resolver` when given, otherwise the calling thread's ambient
/// resolver. Any failure is reported as `Error::TypeLoading` for `name`.
pub fn load_type(name: &str, resolver: Option<&dyn TypeResolver>) -> Result<OwnerType> {
    let result = match resolver {
        Some(resolver) => resolver.resolve_type(name),
        None => match ambient::current() {
            Some(ambient) => ambient.resolve_type(name),
            None => {
                debug!(type_name = name, "No ambient type resolver installed");
                return Err(Error::type_loading(name));
            }
        },
    };

    result.map_err(|err| match err {
        Error::TypeLoading { .. } => err,
        other => Error::type_loading_with_source(name, other),
    })
}
