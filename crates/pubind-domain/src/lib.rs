//! # Domain Layer
//!
//! Core types and boundary contracts shared by every pubind crate.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error taxonomy and `Result` alias |
//! | [`constants`] | Recognized settings keys and access-type tags |
//! | [`value_objects`] | Owner types, access types, property descriptors, contribution lists |
//! | [`ports`] | Traits implemented by external collaborators |
//! | [`settings`] | The settings map handed to a persistence-unit builder |

pub mod constants;
pub mod error;
pub mod ports;
pub mod settings;
pub mod value_objects;

pub use error::{Error, Result};
pub use settings::{SettingValue, Settings};
pub use value_objects::{AccessMode, AccessType, ContributionList, OwnerType, PropertyData, PropertyValue};
