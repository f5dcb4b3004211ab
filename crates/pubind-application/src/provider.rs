//! Persistence provider for bundle-hosted units
//!
//! Composes the settings a persistence-unit builder consumes and runs the
//! build inside the requesting bundle's resolution boundary.
//!
//! ## Settings composition
//!
//! ```text
//! caller properties (or empty)
//!        │ copy
//!        ▼
//! TRANSACTION_PLATFORM            ← host transaction platform (overwrites)
//! INTEGRATOR_PROVIDER             ← ContributionList(discovery.integrators())
//! STRATEGY_REGISTRATION_PROVIDERS ← ContributionList(discovery.strategy_registration_providers())
//! TYPE_CONTRIBUTORS               ← ContributionList(discovery.type_contributors())
//! SCANNER                         ← BundleScanner(unit bundle), bound per entry point
//! ```

use std::fmt;
use std::sync::Arc;

use pubind_domain::constants::{
    INTEGRATOR_PROVIDER, SCANNER, STRATEGY_REGISTRATION_PROVIDERS, TRANSACTION_PLATFORM,
    TYPE_CONTRIBUTORS,
};
use pubind_domain::error::{Error, Result};
use pubind_domain::ports::{
    Bundle, PersistenceUnitBuilder, PersistenceUnitFactory, PersistenceUnitInfo, ServiceDiscovery,
    TransactionPlatform, TypeResolver,
};
use pubind_domain::{ContributionList, SettingValue, Settings};
use tracing::{debug, info, warn};

use crate::ambient;
use crate::boundary::{BundleScanner, BundleTypeResolver};

/// Persistence provider serving one requesting bundle
#[derive(Clone)]
pub struct BundlePersistenceProvider {
    transaction_platform: Arc<dyn TransactionPlatform>,
    discovery: Arc<dyn ServiceDiscovery>,
    builder: Arc<dyn PersistenceUnitBuilder>,
    requesting_bundle: Arc<dyn Bundle>,
}

impl BundlePersistenceProvider {
    /// Create a provider for `requesting_bundle`
    pub fn new(
        transaction_platform: Arc<dyn TransactionPlatform>,
        discovery: Arc<dyn ServiceDiscovery>,
        builder: Arc<dyn PersistenceUnitBuilder>,
        requesting_bundle: Arc<dyn Bundle>,
    ) -> Self {
        Self {
            transaction_platform,
            discovery,
            builder,
            requesting_bundle,
        }
    }

    /// The bundle this provider was handed out to
    pub fn requesting_bundle(&self) -> &Arc<dyn Bundle> {
        &self.requesting_bundle
    }

    /// Compose the settings for one build.
    ///
    /// Recognized keys are always overwritten; everything else is copied
    /// from `properties` unchanged. A fresh contribution list is created
    /// for every call.
    pub fn generate_settings(&self, properties: Option<&Settings>) -> Settings {
        let mut settings = properties.cloned().unwrap_or_default();

        settings.insert(
            TRANSACTION_PLATFORM.to_string(),
            SettingValue::TransactionPlatform(Arc::clone(&self.transaction_platform)),
        );

        let integrators = ContributionList::new(self.discovery.integrators());
        let strategy_providers =
            ContributionList::new(self.discovery.strategy_registration_providers());
        let type_contributors = ContributionList::new(self.discovery.type_contributors());
        debug!(
            integrators = integrators.len(),
            strategy_registration_providers = strategy_providers.len(),
            type_contributors = type_contributors.len(),
            "Discovered contributions"
        );

        settings.insert(
            INTEGRATOR_PROVIDER.to_string(),
            SettingValue::Integrators(integrators),
        );
        settings.insert(
            STRATEGY_REGISTRATION_PROVIDERS.to_string(),
            SettingValue::StrategyRegistrationProviders(strategy_providers),
        );
        settings.insert(
            TYPE_CONTRIBUTORS.to_string(),
            SettingValue::TypeContributors(type_contributors),
        );

        settings
    }

    /// Build the named unit within the requesting bundle's boundary.
    ///
    /// Resources are scanned relative to the requesting bundle. Returns
    /// `Ok(None)` when the builder does not know `unit_name`.
    pub fn create_persistence_unit(
        &self,
        unit_name: &str,
        properties: Option<&Settings>,
    ) -> Result<Option<Arc<dyn PersistenceUnitFactory>>> {
        let mut settings = self.generate_settings(properties);
        bind_scanner(&mut settings, Arc::clone(&self.requesting_bundle));

        let resolver = self.requesting_resolver();
        let factory = ambient::with_boundary(Arc::clone(&resolver), || {
            self.builder.build_named(unit_name, settings, resolver)
        })?;

        match &factory {
            Some(_) => info!(
                unit = unit_name,
                bundle = self.requesting_bundle.symbolic_name(),
                "Built persistence unit"
            ),
            None => warn!(unit = unit_name, "Persistence unit is not known to the builder"),
        }
        Ok(factory)
    }

    /// Build a container-managed unit within the requesting bundle's boundary.
    ///
    /// Resources are scanned relative to the bundle the descriptor's type
    /// resolver was loaded from. Fails with `Error::BoundaryResolution`,
    /// before the builder is invoked, when that resolver does not report
    /// its bundle.
    pub fn create_container_persistence_unit(
        &self,
        info: &dyn PersistenceUnitInfo,
        properties: Option<&Settings>,
    ) -> Result<Arc<dyn PersistenceUnitFactory>> {
        let unit_bundle = info.type_resolver().bundle().ok_or_else(|| {
            Error::boundary_resolution(format!(
                "Type resolver of persistence unit '{}' does not expose its originating bundle",
                info.unit_name()
            ))
        })?;

        let mut settings = self.generate_settings(properties);
        bind_scanner(&mut settings, unit_bundle);

        let resolver = self.requesting_resolver();
        let factory = ambient::with_boundary(Arc::clone(&resolver), || {
            self.builder.build_container(info, settings, resolver)
        })?;

        info!(
            unit = info.unit_name(),
            bundle = self.requesting_bundle.symbolic_name(),
            "Built container-managed persistence unit"
        );
        Ok(factory)
    }

    fn requesting_resolver(&self) -> Arc<dyn TypeResolver> {
        Arc::new(BundleTypeResolver::new(Arc::clone(&self.requesting_bundle)))
    }
}

fn bind_scanner(settings: &mut Settings, bundle: Arc<dyn Bundle>) {
    settings.insert(
        SCANNER.to_string(),
        SettingValue::Scanner(Arc::new(BundleScanner::new(bundle))),
    );
}

impl fmt::Debug for BundlePersistenceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BundlePersistenceProvider")
            .field("transaction_platform", &self.transaction_platform.platform_name())
            .field("requesting_bundle", &self.requesting_bundle.symbolic_name())
            .finish_non_exhaustive()
    }
}

/// Hands out one [`BundlePersistenceProvider`] per requesting bundle
#[derive(Clone)]
pub struct BundlePersistenceProviderService {
    transaction_platform: Arc<dyn TransactionPlatform>,
    discovery: Arc<dyn ServiceDiscovery>,
    builder: Arc<dyn PersistenceUnitBuilder>,
}

impl BundlePersistenceProviderService {
    /// Create the service
    pub fn new(
        transaction_platform: Arc<dyn TransactionPlatform>,
        discovery: Arc<dyn ServiceDiscovery>,
        builder: Arc<dyn PersistenceUnitBuilder>,
    ) -> Self {
        Self {
            transaction_platform,
            discovery,
            builder,
        }
    }

    /// Provider bound to `requesting_bundle`
    pub fn provider_for(&self, requesting_bundle: Arc<dyn Bundle>) -> BundlePersistenceProvider {
        debug!(
            bundle = requesting_bundle.symbolic_name(),
            bundle_id = requesting_bundle.bundle_id(),
            "Handing out persistence provider"
        );
        BundlePersistenceProvider::new(
            Arc::clone(&self.transaction_platform),
            Arc::clone(&self.discovery),
            Arc::clone(&self.builder),
            requesting_bundle,
        )
    }

    /// Release a provider; providers hold no bundle-scoped resources
    pub fn release(&self, requesting_bundle: &dyn Bundle, _provider: BundlePersistenceProvider) {
        debug!(
            bundle = requesting_bundle.symbolic_name(),
            "Released persistence provider"
        );
    }
}

impl fmt::Debug for BundlePersistenceProviderService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BundlePersistenceProviderService")
            .field("transaction_platform", &self.transaction_platform.platform_name())
            .finish_non_exhaustive()
    }
}
