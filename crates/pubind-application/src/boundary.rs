//! Bundle-scoped type resolution and scanning

use std::collections::BTreeSet;
use std::sync::Arc;

use pubind_domain::error::{Error, Result};
use pubind_domain::ports::{Bundle, ScanResult, Scanner, TypeResolver};
use pubind_domain::OwnerType;
use tracing::debug;

use crate::constants::{MAPPING_FILE_SUFFIXES, TYPE_PATH_SEPARATOR};

/// Type resolver that resolves names against one bundle
#[derive(Debug, Clone)]
pub struct BundleTypeResolver {
    bundle: Arc<dyn Bundle>,
}

impl BundleTypeResolver {
    /// Resolver scoped to `bundle`
    pub fn new(bundle: Arc<dyn Bundle>) -> Self {
        Self { bundle }
    }
}

impl TypeResolver for BundleTypeResolver {
    fn resolve_type(&self, name: &str) -> Result<OwnerType> {
        self.bundle.load_type(name).ok_or_else(|| {
            debug!(
                bundle = self.bundle.symbolic_name(),
                type_name = name,
                "Type not visible from bundle"
            );
            Error::type_loading(name)
        })
    }

    fn bundle(&self) -> Option<Arc<dyn Bundle>> {
        Some(Arc::clone(&self.bundle))
    }
}

/// Scanner that discovers types and mapping files packaged in one bundle
#[derive(Debug, Clone)]
pub struct BundleScanner {
    bundle: Arc<dyn Bundle>,
}

impl BundleScanner {
    /// Scanner scoped to `bundle`
    pub fn new(bundle: Arc<dyn Bundle>) -> Self {
        Self { bundle }
    }

    /// The scanned bundle
    pub fn bundle(&self) -> &Arc<dyn Bundle> {
        &self.bundle
    }
}

impl Scanner for BundleScanner {
    fn scan(&self) -> ScanResult {
        let types = self.bundle.type_names();
        let packages: BTreeSet<String> = types
            .iter()
            .filter_map(|name| name.rsplit_once(TYPE_PATH_SEPARATOR))
            .map(|(package, _)| package.to_string())
            .collect();
        let mapping_files = self
            .bundle
            .entries()
            .into_iter()
            .filter(|entry| {
                MAPPING_FILE_SUFFIXES
                    .iter()
                    .any(|suffix| entry.ends_with(suffix))
            })
            .collect();

        ScanResult {
            types,
            packages: packages.into_iter().collect(),
            mapping_files,
        }
    }
}
