//! Property descriptors and access strategies

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{ACCESS_TYPE_FIELD, ACCESS_TYPE_PROPERTY};
use crate::error::Error;

/// Dynamically typed property value read or written through an accessor
pub type PropertyValue = serde_json::Value;

/// How a property is reached on its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    /// Direct field access
    Field,
    /// Accessor-method (getter/setter) access
    Property,
}

impl AccessType {
    /// Both strategies, in the order a lenient lookup tries them
    pub const ALL: [AccessType; 2] = [AccessType::Field, AccessType::Property];

    /// Textual tag of this strategy
    pub const fn as_str(&self) -> &'static str {
        match self {
            AccessType::Field => ACCESS_TYPE_FIELD,
            AccessType::Property => ACCESS_TYPE_PROPERTY,
        }
    }
}

impl FromStr for AccessType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ACCESS_TYPE_FIELD => Ok(AccessType::Field),
            ACCESS_TYPE_PROPERTY => Ok(AccessType::Property),
            other => Err(Error::invalid_argument(format!(
                "Unknown access type '{other}'. Use '{ACCESS_TYPE_FIELD}' or '{ACCESS_TYPE_PROPERTY}'"
            ))),
        }
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a read or a write accessor is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    /// Getter
    Read,
    /// Setter
    Write,
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessMode::Read => f.write_str("read"),
            AccessMode::Write => f.write_str("write"),
        }
    }
}

/// Descriptor of a mapped property.
///
/// `name` is the logical (mapped) name; `bean_name` is the name of the
/// member on the owner type that accessors are resolved against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyData {
    name: String,
    bean_name: String,
    access_type: AccessType,
}

impl PropertyData {
    /// Create a descriptor whose logical and member names differ
    pub fn new<N: Into<String>, B: Into<String>>(
        name: N,
        bean_name: B,
        access_type: AccessType,
    ) -> Self {
        Self {
            name: name.into(),
            bean_name: bean_name.into(),
            access_type,
        }
    }

    /// Create a descriptor whose logical name is the member name
    pub fn simple<N: Into<String>>(name: N, access_type: AccessType) -> Self {
        let name = name.into();
        Self {
            bean_name: name.clone(),
            name,
            access_type,
        }
    }

    /// Logical property name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member name on the owner type
    pub fn bean_name(&self) -> &str {
        &self.bean_name
    }

    /// Declared access strategy
    pub fn access_type(&self) -> AccessType {
        self.access_type
    }
}

impl fmt::Display for PropertyData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.bean_name, self.access_type)
    }
}
