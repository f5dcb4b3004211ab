//! Type metadata registry
//!
//! Runtime stand-in for reflection: owner types register their declared
//! properties with typed read/write closures, and
//! [`MetadataAccessorResolver`] turns those registrations into accessor
//! handles for the accessor cache.
//!
//! ```ignore
//! registry.register_type::<Order, _>(|t| {
//!     t.field("total", |o| o.total, |o, v| o.total = v)
//!         .property("label", |o| o.label(), |o, v| o.set_label(v))
//!         .read_only("id", AccessType::Field, |o| o.id)
//! });
//! ```

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use dashmap::DashMap;
use pubind_domain::error::{Error, Result};
use pubind_domain::ports::{
    DeclaredProperty, Getter, PropertyAccessorResolver, PropertyMetadataSource, Setter,
};
use pubind_domain::{AccessMode, AccessType, OwnerType, PropertyValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error_ext::ErrorContext;

type ReadFn = Arc<dyn Fn(&dyn Any) -> Result<PropertyValue> + Send + Sync>;
type WriteFn = Arc<dyn Fn(&mut dyn Any, PropertyValue) -> Result<()> + Send + Sync>;

struct PropertyMetadata {
    name: String,
    access_type: AccessType,
    read: ReadFn,
    write: Option<WriteFn>,
}

/// Declared properties of one owner type
pub struct TypeMetadata {
    owner: OwnerType,
    properties: Vec<PropertyMetadata>,
}

impl TypeMetadata {
    /// The described type
    pub fn owner(&self) -> OwnerType {
        self.owner
    }

    /// Properties declared under `access_type`, in declaration order
    pub fn declared(&self, access_type: AccessType) -> Vec<DeclaredProperty> {
        self.properties
            .iter()
            .filter(|p| p.access_type == access_type)
            .map(|p| DeclaredProperty {
                name: p.name.clone(),
                access_type: p.access_type,
                writable: p.write.is_some(),
            })
            .collect()
    }

    fn find(&self, name: &str, access_type: AccessType) -> Option<&PropertyMetadata> {
        self.properties
            .iter()
            .find(|p| p.name == name && p.access_type == access_type)
    }
}

impl fmt::Debug for TypeMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self
            .properties
            .iter()
            .map(|p| format!("{}:{}", p.name, p.access_type))
            .collect();
        f.debug_struct("TypeMetadata")
            .field("owner", &self.owner.name())
            .field("properties", &names)
            .finish()
    }
}

/// Collects the property declarations of `T`
pub struct TypeMetadataBuilder<T> {
    properties: Vec<PropertyMetadata>,
    _owner: PhantomData<fn(T)>,
}

impl<T: Any> TypeMetadataBuilder<T> {
    /// Start an empty declaration
    pub fn new() -> Self {
        Self {
            properties: Vec::new(),
            _owner: PhantomData,
        }
    }

    /// Declare a writable property accessed directly as a field
    pub fn field<V, G, S>(self, name: &str, get: G, set: S) -> Self
    where
        V: Serialize + DeserializeOwned + 'static,
        G: Fn(&T) -> V + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.declare(name, AccessType::Field, get, Some(set))
    }

    /// Declare a writable property accessed through accessor methods
    pub fn property<V, G, S>(self, name: &str, get: G, set: S) -> Self
    where
        V: Serialize + DeserializeOwned + 'static,
        G: Fn(&T) -> V + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.declare(name, AccessType::Property, get, Some(set))
    }

    /// Declare a property without a setter
    pub fn read_only<V, G>(self, name: &str, access_type: AccessType, get: G) -> Self
    where
        V: Serialize + DeserializeOwned + 'static,
        G: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.declare::<V, G, fn(&mut T, V)>(name, access_type, get, None)
    }

    /// Finish the declaration
    pub fn build(self) -> TypeMetadata {
        TypeMetadata {
            owner: OwnerType::of::<T>(),
            properties: self.properties,
        }
    }

    fn declare<V, G, S>(
        mut self,
        name: &str,
        access_type: AccessType,
        get: G,
        set: Option<S>,
    ) -> Self
    where
        V: Serialize + DeserializeOwned + 'static,
        G: Fn(&T) -> V + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        let read: ReadFn = Arc::new(move |owner: &dyn Any| {
            let owner = downcast_ref::<T>(owner)?;
            Ok(serde_json::to_value(get(owner))?)
        });
        let write = set.map(|set| -> WriteFn {
            let property = name.to_string();
            Arc::new(move |owner: &mut dyn Any, value: PropertyValue| {
                let owner = downcast_mut::<T>(owner)?;
                let value: V = serde_json::from_value(value)
                    .argument_context(format_args!("Invalid value for property '{property}'"))?;
                set(owner, value);
                Ok(())
            })
        });

        // Redeclaring a member replaces the earlier declaration
        self.properties
            .retain(|p| !(p.name == name && p.access_type == access_type));
        self.properties.push(PropertyMetadata {
            name: name.to_string(),
            access_type,
            read,
            write,
        });
        self
    }
}

impl<T: Any> Default for TypeMetadataBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn downcast_ref<T: Any>(owner: &dyn Any) -> Result<&T> {
    owner.downcast_ref::<T>().ok_or_else(|| {
        Error::invalid_argument(format!("Owner is not an instance of {}", std::any::type_name::<T>()))
    })
}

fn downcast_mut<T: Any>(owner: &mut dyn Any) -> Result<&mut T> {
    owner.downcast_mut::<T>().ok_or_else(|| {
        Error::invalid_argument(format!("Owner is not an instance of {}", std::any::type_name::<T>()))
    })
}

/// Concurrent registry of type metadata keyed by owner type
#[derive(Debug, Default)]
pub struct TypeMetadataRegistry {
    types: DashMap<OwnerType, Arc<TypeMetadata>>,
}

impl TypeMetadataRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the metadata of its owner type
    pub fn register(&self, metadata: TypeMetadata) {
        let owner = metadata.owner();
        debug!(
            owner = owner.name(),
            properties = metadata.properties.len(),
            "Registered type metadata"
        );
        self.types.insert(owner, Arc::new(metadata));
    }

    /// Declare and register the properties of `T`
    pub fn register_type<T, F>(&self, declare: F)
    where
        T: Any,
        F: FnOnce(TypeMetadataBuilder<T>) -> TypeMetadataBuilder<T>,
    {
        self.register(declare(TypeMetadataBuilder::new()).build());
    }

    /// Metadata of `owner`, if registered
    pub fn get(&self, owner: OwnerType) -> Option<Arc<TypeMetadata>> {
        self.types.get(&owner).map(|entry| Arc::clone(entry.value()))
    }

    /// Remove the metadata of `owner`; accessors already handed out keep working
    pub fn remove(&self, owner: OwnerType) -> Option<Arc<TypeMetadata>> {
        self.types.remove(&owner).map(|(_, metadata)| metadata)
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no type is registered
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl PropertyMetadataSource for TypeMetadataRegistry {
    fn declared_properties(
        &self,
        owner: OwnerType,
        access_type: AccessType,
    ) -> Vec<DeclaredProperty> {
        self.get(owner)
            .map(|metadata| metadata.declared(access_type))
            .unwrap_or_default()
    }
}

// ============================================================================
// Accessor handles
// ============================================================================

struct MetadataGetter {
    owner: OwnerType,
    name: String,
    access_type: AccessType,
    read: ReadFn,
}

impl Getter for MetadataGetter {
    fn get(&self, owner: &dyn Any) -> Result<PropertyValue> {
        (self.read)(owner)
    }

    fn property_name(&self) -> &str {
        &self.name
    }

    fn access_type(&self) -> AccessType {
        self.access_type
    }
}

impl fmt::Debug for MetadataGetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataGetter")
            .field("owner", &self.owner.name())
            .field("name", &self.name)
            .field("access_type", &self.access_type)
            .finish()
    }
}

struct MetadataSetter {
    owner: OwnerType,
    name: String,
    access_type: AccessType,
    write: WriteFn,
}

impl Setter for MetadataSetter {
    fn set(&self, owner: &mut dyn Any, value: PropertyValue) -> Result<()> {
        (self.write)(owner, value)
    }

    fn property_name(&self) -> &str {
        &self.name
    }

    fn access_type(&self) -> AccessType {
        self.access_type
    }
}

impl fmt::Debug for MetadataSetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataSetter")
            .field("owner", &self.owner.name())
            .field("name", &self.name)
            .field("access_type", &self.access_type)
            .finish()
    }
}

/// Accessor resolver backed by a [`TypeMetadataRegistry`]
#[derive(Debug, Clone)]
pub struct MetadataAccessorResolver {
    registry: Arc<TypeMetadataRegistry>,
}

impl MetadataAccessorResolver {
    /// Resolver over `registry`
    pub fn new(registry: Arc<TypeMetadataRegistry>) -> Self {
        Self { registry }
    }

    /// The backing registry
    pub fn registry(&self) -> &Arc<TypeMetadataRegistry> {
        &self.registry
    }
}

impl PropertyAccessorResolver for MetadataAccessorResolver {
    fn getter(
        &self,
        owner: OwnerType,
        property_name: &str,
        access_type: AccessType,
    ) -> Result<Arc<dyn Getter>> {
        let not_found =
            || Error::property_not_found(owner.name(), property_name, access_type, AccessMode::Read);
        let metadata = self.registry.get(owner).ok_or_else(not_found)?;
        let property = metadata
            .find(property_name, access_type)
            .ok_or_else(not_found)?;

        Ok(Arc::new(MetadataGetter {
            owner,
            name: property.name.clone(),
            access_type,
            read: Arc::clone(&property.read),
        }))
    }

    fn setter(
        &self,
        owner: OwnerType,
        property_name: &str,
        access_type: AccessType,
    ) -> Result<Arc<dyn Setter>> {
        let not_found = || {
            Error::property_not_found(owner.name(), property_name, access_type, AccessMode::Write)
        };
        let metadata = self.registry.get(owner).ok_or_else(not_found)?;
        let write = metadata
            .find(property_name, access_type)
            .and_then(|property| property.write.as_ref())
            .ok_or_else(not_found)?;

        Ok(Arc::new(MetadataSetter {
            owner,
            name: property_name.to_string(),
            access_type,
            write: Arc::clone(write),
        }))
    }
}
