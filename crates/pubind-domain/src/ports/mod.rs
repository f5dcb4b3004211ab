//! Domain Port Interfaces
//!
//! Boundary contracts implemented by external collaborators:
//!
//! - **accessor** - accessor handles and the resolver that builds them
//! - **boundary** - module handles, type resolvers, resource scanners
//! - **contribution** - strategy contributions and their discovery
//! - **persistence** - the persistence-unit builder and its descriptors

pub mod accessor;
pub mod boundary;
pub mod contribution;
pub mod persistence;

pub use accessor::{DeclaredProperty, Getter, PropertyAccessorResolver, PropertyMetadataSource, Setter};
pub use boundary::{Bundle, ScanResult, Scanner, TypeResolver};
pub use contribution::{
    Integrator, ServiceDiscovery, StrategyRegistration, StrategyRegistrationProvider,
    TransactionPlatform, TypeContributions, TypeContributor,
};
pub use persistence::{PersistenceUnitBuilder, PersistenceUnitFactory, PersistenceUnitInfo};
