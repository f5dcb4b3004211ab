//! In-process service registry
//!
//! Runtime registration of strategy contributions, queried by provider
//! composition through [`ServiceDiscovery`]. Services are reported by
//! descending ranking, then in registration order. Contributions linked
//! into the binary follow the runtime ones when `include_linked` is set.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use pubind_application::registry::LinkedServiceDiscovery;
use pubind_domain::ports::{
    Integrator, ServiceDiscovery, StrategyRegistrationProvider, TypeContributor,
};
use tracing::debug;

use crate::constants::DEFAULT_SERVICE_RANKING;

/// Handle of one registration, used to unregister it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceId(u64);

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "service#{}", self.0)
    }
}

struct Ranked<T: ?Sized> {
    ranking: i32,
    service: Arc<T>,
}

/// Registry of runtime-registered contributions
pub struct ServiceRegistry {
    next_id: AtomicU64,
    include_linked: bool,
    integrators: DashMap<ServiceId, Ranked<dyn Integrator>>,
    strategy_providers: DashMap<ServiceId, Ranked<dyn StrategyRegistrationProvider>>,
    type_contributors: DashMap<ServiceId, Ranked<dyn TypeContributor>>,
}

impl ServiceRegistry {
    /// Empty registry; `include_linked` appends link-time contributions
    pub fn new(include_linked: bool) -> Self {
        Self {
            next_id: AtomicU64::new(1),
            include_linked,
            integrators: DashMap::new(),
            strategy_providers: DashMap::new(),
            type_contributors: DashMap::new(),
        }
    }

    /// Register an integrator with the default ranking
    pub fn register_integrator(&self, integrator: Arc<dyn Integrator>) -> ServiceId {
        self.register_integrator_ranked(integrator, DEFAULT_SERVICE_RANKING)
    }

    /// Register an integrator; higher rankings are reported first
    pub fn register_integrator_ranked(
        &self,
        integrator: Arc<dyn Integrator>,
        ranking: i32,
    ) -> ServiceId {
        let id = self.next_id();
        debug!(%id, name = integrator.name(), ranking, "Registered integrator");
        self.integrators.insert(
            id,
            Ranked {
                ranking,
                service: integrator,
            },
        );
        id
    }

    /// Register a strategy-registration provider with the default ranking
    pub fn register_strategy_registration_provider(
        &self,
        provider: Arc<dyn StrategyRegistrationProvider>,
    ) -> ServiceId {
        self.register_strategy_registration_provider_ranked(provider, DEFAULT_SERVICE_RANKING)
    }

    /// Register a strategy-registration provider with a ranking
    pub fn register_strategy_registration_provider_ranked(
        &self,
        provider: Arc<dyn StrategyRegistrationProvider>,
        ranking: i32,
    ) -> ServiceId {
        let id = self.next_id();
        debug!(%id, ranking, "Registered strategy registration provider");
        self.strategy_providers.insert(
            id,
            Ranked {
                ranking,
                service: provider,
            },
        );
        id
    }

    /// Register a type contributor with the default ranking
    pub fn register_type_contributor(&self, contributor: Arc<dyn TypeContributor>) -> ServiceId {
        self.register_type_contributor_ranked(contributor, DEFAULT_SERVICE_RANKING)
    }

    /// Register a type contributor with a ranking
    pub fn register_type_contributor_ranked(
        &self,
        contributor: Arc<dyn TypeContributor>,
        ranking: i32,
    ) -> ServiceId {
        let id = self.next_id();
        debug!(%id, ranking, "Registered type contributor");
        self.type_contributors.insert(
            id,
            Ranked {
                ranking,
                service: contributor,
            },
        );
        id
    }

    /// Remove a registration. Returns whether it was present.
    ///
    /// Settings composed earlier keep the services they captured.
    pub fn unregister(&self, id: ServiceId) -> bool {
        let removed = self.integrators.remove(&id).is_some()
            || self.strategy_providers.remove(&id).is_some()
            || self.type_contributors.remove(&id).is_some();
        if removed {
            debug!(%id, "Unregistered service");
        }
        removed
    }

    /// Number of runtime registrations across all capabilities
    pub fn len(&self) -> usize {
        self.integrators.len() + self.strategy_providers.len() + self.type_contributors.len()
    }

    /// Whether nothing is registered at runtime
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether link-time contributions are appended
    pub fn includes_linked(&self) -> bool {
        self.include_linked
    }

    fn next_id(&self) -> ServiceId {
        ServiceId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}

fn ranked_snapshot<T: ?Sized>(map: &DashMap<ServiceId, Ranked<T>>) -> Vec<Arc<T>> {
    let mut entries: Vec<(i32, ServiceId, Arc<T>)> = map
        .iter()
        .map(|entry| {
            (
                entry.value().ranking,
                *entry.key(),
                Arc::clone(&entry.value().service),
            )
        })
        .collect();
    entries.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    entries.into_iter().map(|(_, _, service)| service).collect()
}

impl ServiceDiscovery for ServiceRegistry {
    fn integrators(&self) -> Vec<Arc<dyn Integrator>> {
        let mut services = ranked_snapshot(&self.integrators);
        if self.include_linked {
            services.extend(LinkedServiceDiscovery.integrators());
        }
        services
    }

    fn strategy_registration_providers(&self) -> Vec<Arc<dyn StrategyRegistrationProvider>> {
        let mut services = ranked_snapshot(&self.strategy_providers);
        if self.include_linked {
            services.extend(LinkedServiceDiscovery.strategy_registration_providers());
        }
        services
    }

    fn type_contributors(&self) -> Vec<Arc<dyn TypeContributor>> {
        let mut services = ranked_snapshot(&self.type_contributors);
        if self.include_linked {
            services.extend(LinkedServiceDiscovery.type_contributors());
        }
        services
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new(true)
    }
}

impl fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("include_linked", &self.include_linked)
            .field("integrators", &self.integrators.len())
            .field("strategy_registration_providers", &self.strategy_providers.len())
            .field("type_contributors", &self.type_contributors.len())
            .finish()
    }
}
