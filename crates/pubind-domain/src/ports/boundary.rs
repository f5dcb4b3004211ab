//! Module Boundary Ports
//!
//! A bundle is the opaque module handle a persistence unit is requested
//! from. Type names and resources are resolved relative to a bundle
//! through a [`TypeResolver`], and entity discovery walks it through a
//! [`Scanner`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::value_objects::OwnerType;

/// Opaque module handle supplied by the hosting runtime
pub trait Bundle: Send + Sync + fmt::Debug {
    /// Runtime-assigned identifier
    fn bundle_id(&self) -> u64;

    /// Symbolic name of the module
    fn symbolic_name(&self) -> &str;

    /// Resolve a type visible from this module
    fn load_type(&self, name: &str) -> Option<OwnerType>;

    /// Names of the types this module exposes
    fn type_names(&self) -> Vec<String>;

    /// Resource paths packaged in this module
    fn entries(&self) -> Vec<String>;
}

/// Resolves type names to owner types within a resolution scope.
///
/// The thread's ambient resolver is one of these; resolvers built from a
/// bundle report that bundle through [`TypeResolver::bundle`].
pub trait TypeResolver: Send + Sync + fmt::Debug {
    /// Resolve `name` or fail with `Error::TypeLoading`
    fn resolve_type(&self, name: &str) -> Result<OwnerType>;

    /// The bundle this resolver was loaded from, if it knows one
    fn bundle(&self) -> Option<Arc<dyn Bundle>> {
        None
    }
}

/// Outcome of scanning a module for persistence artifacts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Type names found in the module
    pub types: Vec<String>,
    /// Module paths containing those types
    pub packages: Vec<String>,
    /// Mapping descriptor resources
    pub mapping_files: Vec<String>,
}

impl ScanResult {
    /// Whether the scan found nothing
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.packages.is_empty() && self.mapping_files.is_empty()
    }
}

/// Discovers entities and mapping resources for a persistence unit
pub trait Scanner: Send + Sync + fmt::Debug {
    /// Scan the scanner's resolution scope
    fn scan(&self) -> ScanResult;
}
