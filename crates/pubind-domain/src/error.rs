//! Error handling types

use thiserror::Error;

use crate::value_objects::{AccessMode, AccessType};

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed source error carried by the contextual variants
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for pubind
#[derive(Error, Debug)]
pub enum Error {
    /// The accessor resolver could not find the named property.
    ///
    /// Never cached: the next lookup for the same key retries resolution.
    #[error("Property not found: {owner}.{property} ({access_type} access, {mode})")]
    PropertyNotFound {
        /// Name of the owner type
        owner: String,
        /// Requested property name
        property: String,
        /// Access strategy used for the lookup
        access_type: AccessType,
        /// Whether a read or a write accessor was requested
        mode: AccessMode,
    },

    /// A persistence-unit descriptor did not expose its originating bundle
    #[error("Boundary resolution error: {message}")]
    BoundaryResolution {
        /// Description of the missing boundary
        message: String,
    },

    /// Opaque failure reported by the persistence-unit builder
    #[error("Builder error: {message}")]
    Builder {
        /// Description reported by the builder
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// A type name could not be resolved against a type resolver
    #[error("Unable to load type [{name}]")]
    TypeLoading {
        /// The type name that failed to resolve
        name: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// I/O operation error (simple form)
    #[error("I/O error: {source}")]
    IoSimple {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Infrastructure error with context
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// JSON conversion error
    #[error("JSON error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Accessor and boundary error creation methods
impl Error {
    /// Create a property-not-found error
    pub fn property_not_found<O: Into<String>, P: Into<String>>(
        owner: O,
        property: P,
        access_type: AccessType,
        mode: AccessMode,
    ) -> Self {
        Self::PropertyNotFound {
            owner: owner.into(),
            property: property.into(),
            access_type,
            mode,
        }
    }

    /// Create a boundary resolution error
    pub fn boundary_resolution<S: Into<String>>(message: S) -> Self {
        Self::BoundaryResolution {
            message: message.into(),
        }
    }

    /// Create a type loading error
    pub fn type_loading<S: Into<String>>(name: S) -> Self {
        Self::TypeLoading {
            name: name.into(),
            source: None,
        }
    }

    /// Create a type loading error with source
    pub fn type_loading_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        name: S,
        source: E,
    ) -> Self {
        Self::TypeLoading {
            name: name.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether this is a property-not-found error
    pub fn is_property_not_found(&self) -> bool {
        matches!(self, Self::PropertyNotFound { .. })
    }
}

// Builder error creation methods
impl Error {
    /// Create a builder error
    pub fn builder<S: Into<String>>(message: S) -> Self {
        Self::Builder {
            message: message.into(),
            source: None,
        }
    }

    /// Create a builder error with source
    pub fn builder_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Builder {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Basic error creation methods
impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an infrastructure error
    pub fn infrastructure<S: Into<String>>(message: S) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: None,
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
