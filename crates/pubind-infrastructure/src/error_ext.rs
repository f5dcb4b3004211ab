//! Error extension utilities
//!
//! Context extension methods converting foreign errors into the domain
//! [`Error`]. The variant chosen tells callers who is at fault: the
//! environment (`io_context`), the configuration (`config_context`), the
//! caller's input (`argument_context`), or anything else (`context`).

use std::fmt;

use pubind_domain::error::{Error, Result};

/// Extension trait for adding context to errors
///
/// # Example
///
/// ```ignore
/// use pubind_infrastructure::error_ext::ErrorContext;
///
/// let config: AppConfig = figment
///     .extract()
///     .config_context("Failed to extract configuration")?;
///
/// let amount: i64 = serde_json::from_value(value)
///     .argument_context("Invalid value for property 'amount'")?;
/// ```
pub trait ErrorContext<T> {
    /// Wrap the error as `Error::Infrastructure`, keeping it as the source
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display;

    /// Wrap the error as `Error::Io`, keeping it as the source
    fn io_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display;

    /// Wrap the error as `Error::Configuration`, keeping it as the source
    fn config_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display;

    /// Report the error as `Error::InvalidArgument`; the cause is folded
    /// into the message
    fn argument_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display,
    {
        self.map_err(|err| Error::Infrastructure {
            message: format!("{context}: {err}"),
            source: Some(Box::new(err)),
        })
    }

    fn io_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display,
    {
        self.map_err(|err| Error::Io {
            message: format!("{context}: {err}"),
            source: Some(Box::new(err)),
        })
    }

    fn config_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display,
    {
        self.map_err(|err| Error::Configuration {
            message: format!("{context}: {err}"),
            source: Some(Box::new(err)),
        })
    }

    fn argument_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display,
    {
        self.map_err(|err| Error::invalid_argument(format!("{context}: {err}")))
    }
}
