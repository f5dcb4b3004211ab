//! Value objects
//!
//! Immutable values passed between the accessor cache, the accessor
//! resolvers and the provider composition.

pub mod contribution;
pub mod owner;
pub mod property;

pub use contribution::ContributionList;
pub use owner::OwnerType;
pub use property::{AccessMode, AccessType, PropertyData, PropertyValue};
