//! Ambient context scoping tests

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use pubind_application::ambient;
use pubind_application::{BundleTypeResolver, with_boundary};
use pubind_domain::ports::TypeResolver;
use pubind_domain::{Error, OwnerType};

use crate::test_utils::{TestBundle, ambient_bundle_name};

fn bundle_resolver(name: &str) -> Arc<dyn TypeResolver> {
    Arc::new(BundleTypeResolver::new(TestBundle::new(1, name).shared()))
}

#[test]
fn test_boundary_is_ambient_during_operation() {
    let seen = with_boundary(bundle_resolver("orders"), || Ok(ambient_bundle_name())).unwrap();
    assert_eq!(seen.as_deref(), Some("orders"));
    assert!(ambient::current().is_none());
}

#[test]
fn test_restores_previous_context_on_success() {
    let _outer = ambient::install(bundle_resolver("host"));

    let value = with_boundary(bundle_resolver("orders"), || Ok(5)).unwrap();

    assert_eq!(value, 5);
    assert_eq!(ambient_bundle_name().as_deref(), Some("host"));
}

#[test]
fn test_restores_previous_context_on_error() {
    let _outer = ambient::install(bundle_resolver("host"));

    let result: pubind_domain::Result<()> =
        with_boundary(bundle_resolver("orders"), || Err(Error::builder("broken mapping")));

    assert!(matches!(result, Err(Error::Builder { .. })));
    assert_eq!(ambient_bundle_name().as_deref(), Some("host"));
}

#[test]
fn test_restores_previous_context_on_panic() {
    let _outer = ambient::install(bundle_resolver("host"));

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        with_boundary(bundle_resolver("orders"), || -> pubind_domain::Result<()> {
            panic!("unexpected fault")
        })
    }));

    assert!(outcome.is_err());
    assert_eq!(ambient_bundle_name().as_deref(), Some("host"));
}

#[test]
fn test_context_is_thread_local() {
    let _guard = ambient::install(bundle_resolver("main-thread"));

    let other = thread::spawn(|| ambient::current().is_none()).join().unwrap();

    assert!(other);
    assert_eq!(ambient_bundle_name().as_deref(), Some("main-thread"));
}

#[test]
fn test_ambient_resolver_resolves_bundle_types() {
    struct Shipment;
    let bundle = TestBundle::new(3, "shipping")
        .with_type("shipping::Shipment", OwnerType::of::<Shipment>())
        .shared();

    let resolved = with_boundary(Arc::new(BundleTypeResolver::new(bundle)), || {
        ambient::current()
            .expect("ambient resolver")
            .resolve_type("shipping::Shipment")
    })
    .unwrap();

    assert_eq!(resolved, OwnerType::of::<Shipment>());
}
