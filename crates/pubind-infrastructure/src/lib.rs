//! # Infrastructure Layer
//!
//! Ambient services around the application layer.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-based configuration loading |
//! | [`logging`] | Tracing subscriber setup |
//! | [`metadata`] | Type metadata registry and the accessor resolver over it |
//! | [`services`] | Runtime contribution registry |
//! | [`bootstrap`] | Composition root |
//! | [`error_ext`] | Context extensions for foreign errors |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;
pub mod metadata;
pub mod services;

pub use bootstrap::{AppContext, init_context};
pub use config::{AppConfig, ConfigLoader};
pub use error_ext::ErrorContext;
pub use metadata::{MetadataAccessorResolver, TypeMetadataRegistry};
pub use services::{ServiceId, ServiceRegistry};
