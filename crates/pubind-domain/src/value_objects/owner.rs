//! Owner type identity

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of the type a property accessor is resolved on.
///
/// Equality and hashing use the [`TypeId`] only; the name is carried for
/// diagnostics and for name-based lookups through a type resolver.
#[derive(Clone, Copy)]
pub struct OwnerType {
    id: TypeId,
    name: &'static str,
}

impl OwnerType {
    /// Owner type of `T`
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The underlying type id
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Name without its module path
    pub fn simple_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }

    /// Whether `value` is an instance of this type
    pub fn is_instance(&self, value: &dyn Any) -> bool {
        value.type_id() == self.id
    }
}

impl PartialEq for OwnerType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for OwnerType {}

impl Hash for OwnerType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for OwnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OwnerType").field(&self.name).finish()
    }
}

impl fmt::Display for OwnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
