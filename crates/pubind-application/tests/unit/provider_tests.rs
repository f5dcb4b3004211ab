//! Provider composition and bundle-scoped build tests

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::Ordering;

use pubind_application::{
    BundlePersistenceProvider, BundlePersistenceProviderService, BundleTypeResolver, ambient,
};
use pubind_domain::constants::{
    INTEGRATOR_PROVIDER, RECOGNIZED_SETTINGS_KEYS, SCANNER, STRATEGY_REGISTRATION_PROVIDERS,
    TRANSACTION_PLATFORM, TYPE_CONTRIBUTORS,
};
use pubind_domain::ports::{Bundle, PersistenceUnitBuilder, ServiceDiscovery, TypeResolver};
use pubind_domain::settings::settings_from_values;
use pubind_domain::{Error, OwnerType, SettingValue, Settings};
use serde_json::json;

use crate::test_utils::{
    BuildOutcome, DetachedResolver, RecordingBuilder, StaticDiscovery, TestBundle, TestPlatform,
    TestUnitInfo, ambient_bundle_name,
};

struct Customer;
struct Ledger;

fn requesting_bundle() -> Arc<dyn Bundle> {
    TestBundle::new(7, "shop")
        .with_type("shop::Customer", OwnerType::of::<Customer>())
        .shared()
}

fn provider_with(
    discovery: Arc<dyn ServiceDiscovery>,
    builder: Arc<dyn PersistenceUnitBuilder>,
) -> BundlePersistenceProvider {
    BundlePersistenceProvider::new(
        Arc::new(TestPlatform("host-jta")),
        discovery,
        builder,
        requesting_bundle(),
    )
}

fn integrator_names(settings: &Settings) -> Vec<String> {
    settings[INTEGRATOR_PROVIDER]
        .as_integrators()
        .expect("integrator list")
        .contributions()
        .iter()
        .map(|integrator| integrator.name().to_string())
        .collect()
}

// ============================================================================
// Settings composition
// ============================================================================

#[test]
fn test_missing_properties_are_treated_as_empty() {
    let provider = provider_with(
        Arc::new(StaticDiscovery::populated()),
        Arc::new(RecordingBuilder::new(BuildOutcome::Succeed)),
    );

    let settings = provider.generate_settings(None);

    assert_eq!(settings.len(), 4);
    for key in [
        TRANSACTION_PLATFORM,
        INTEGRATOR_PROVIDER,
        STRATEGY_REGISTRATION_PROVIDERS,
        TYPE_CONTRIBUTORS,
    ] {
        assert!(settings.contains_key(key), "missing {key}");
    }
    assert!(!settings.contains_key(SCANNER));
}

#[test]
fn test_unrecognized_keys_pass_through() {
    let provider = provider_with(
        Arc::new(StaticDiscovery::populated()),
        Arc::new(RecordingBuilder::new(BuildOutcome::Succeed)),
    );
    let properties = settings_from_values([("dialect", json!("postgres")), ("batch", json!(50))]);

    let settings = provider.generate_settings(Some(&properties));

    assert_eq!(settings["dialect"].as_str(), Some("postgres"));
    assert_eq!(settings["batch"].as_value(), Some(&json!(50)));
}

#[test]
fn test_framework_platform_overrides_caller_value() {
    let provider = provider_with(
        Arc::new(StaticDiscovery::populated()),
        Arc::new(RecordingBuilder::new(BuildOutcome::Succeed)),
    );
    let mut properties = Settings::new();
    properties.insert(TRANSACTION_PLATFORM.to_string(), "caller-platform".into());
    properties.insert(INTEGRATOR_PROVIDER.to_string(), "caller-integrators".into());

    let settings = provider.generate_settings(Some(&properties));

    let platform = settings[TRANSACTION_PLATFORM]
        .as_transaction_platform()
        .expect("platform entry");
    assert_eq!(platform.platform_name(), "host-jta");
    assert_eq!(integrator_names(&settings), vec!["audit", "search"]);
}

#[test]
fn test_contributions_keep_discovery_order() {
    let provider = provider_with(
        Arc::new(StaticDiscovery::populated()),
        Arc::new(RecordingBuilder::new(BuildOutcome::Succeed)),
    );

    let settings = provider.generate_settings(None);

    assert_eq!(integrator_names(&settings), vec!["audit", "search"]);
    let strategies = settings[STRATEGY_REGISTRATION_PROVIDERS]
        .as_strategy_registration_providers()
        .unwrap()
        .contributions();
    assert_eq!(strategies.len(), 1);
    assert_eq!(strategies[0].strategy_registrations()[0].implementation, "jta");
    assert_eq!(
        settings[TYPE_CONTRIBUTORS].as_type_contributors().unwrap().len(),
        1
    );
}

#[test]
fn test_empty_discovery_yields_empty_lists() {
    let provider = provider_with(
        Arc::new(StaticDiscovery::default()),
        Arc::new(RecordingBuilder::new(BuildOutcome::Succeed)),
    );

    let settings = provider.generate_settings(None);

    assert!(settings[INTEGRATOR_PROVIDER].as_integrators().unwrap().contributions().is_empty());
    assert!(
        settings[STRATEGY_REGISTRATION_PROVIDERS]
            .as_strategy_registration_providers()
            .unwrap()
            .contributions()
            .is_empty()
    );
    assert!(settings[TYPE_CONTRIBUTORS].as_type_contributors().unwrap().contributions().is_empty());
}

#[test]
fn test_composition_is_idempotent_in_content() {
    let discovery = Arc::new(StaticDiscovery::populated());
    let provider = provider_with(
        discovery.clone(),
        Arc::new(RecordingBuilder::new(BuildOutcome::Succeed)),
    );
    let properties = settings_from_values([("dialect", json!("sqlite"))]);

    let first = provider.generate_settings(Some(&properties));
    let second = provider.generate_settings(Some(&properties));

    assert_eq!(
        first.keys().collect::<std::collections::BTreeSet<_>>(),
        second.keys().collect::<std::collections::BTreeSet<_>>()
    );
    let (SettingValue::Integrators(a), SettingValue::Integrators(b)) =
        (&first[INTEGRATOR_PROVIDER], &second[INTEGRATOR_PROVIDER])
    else {
        panic!("integrator lists expected");
    };
    assert!(a.same_contributions(b));
    assert!(
        first[TYPE_CONTRIBUTORS]
            .as_type_contributors()
            .unwrap()
            .same_contributions(second[TYPE_CONTRIBUTORS].as_type_contributors().unwrap())
    );
    // Discovery is queried afresh for every composition.
    assert_eq!(discovery.queries.load(Ordering::SeqCst), 6);
}

// ============================================================================
// Named unit builds
// ============================================================================

#[test]
fn test_named_build_runs_inside_requesting_bundle() {
    let builder = Arc::new(RecordingBuilder::new(BuildOutcome::Succeed));
    let provider = provider_with(Arc::new(StaticDiscovery::populated()), builder.clone());

    let factory = provider
        .create_persistence_unit("orders", None)
        .unwrap()
        .expect("factory");

    assert_eq!(factory.unit_name(), "orders");
    let observation = builder.last_observation();
    assert_eq!(observation.ambient_bundle.as_deref(), Some("shop"));
    assert_eq!(observation.resolver_bundle.as_deref(), Some("shop"));
    assert_eq!(observation.scanned_types, vec!["shop::Customer"]);
    let mut expected: Vec<_> = RECOGNIZED_SETTINGS_KEYS.iter().map(ToString::to_string).collect();
    expected.sort();
    assert_eq!(observation.settings_keys, expected);
    assert!(ambient::current().is_none());
}

#[test]
fn test_named_build_unknown_unit() {
    let builder = Arc::new(RecordingBuilder::new(BuildOutcome::Unknown));
    let provider = provider_with(Arc::new(StaticDiscovery::default()), builder.clone());

    assert!(provider.create_persistence_unit("missing", None).unwrap().is_none());
    assert_eq!(builder.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_builder_error_propagates_after_restoring_context() {
    let host: Arc<dyn TypeResolver> = Arc::new(DetachedResolver);
    let _host_guard = ambient::install(Arc::clone(&host));
    let provider = provider_with(
        Arc::new(StaticDiscovery::populated()),
        Arc::new(RecordingBuilder::new(BuildOutcome::Fail)),
    );

    let error = provider.create_persistence_unit("orders", None).unwrap_err();

    match error {
        Error::Builder { message, .. } => assert_eq!(message, "cannot build 'orders'"),
        other => panic!("Expected Builder error, got {other:?}"),
    }
    assert!(ambient::current().is_some_and(|current| Arc::ptr_eq(&current, &host)));
}

#[test]
fn test_builder_panic_restores_context() {
    let _host_guard = ambient::install(Arc::new(BundleTypeResolver::new(
        TestBundle::new(1, "host").shared(),
    )));
    let provider = provider_with(
        Arc::new(StaticDiscovery::populated()),
        Arc::new(RecordingBuilder::new(BuildOutcome::Panic)),
    );

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        provider.create_persistence_unit("orders", None)
    }));

    assert!(outcome.is_err());
    assert_eq!(ambient_bundle_name().as_deref(), Some("host"));
}

// ============================================================================
// Container-managed builds
// ============================================================================

#[test]
fn test_container_build_scans_descriptor_bundle() {
    let builder = Arc::new(RecordingBuilder::new(BuildOutcome::Succeed));
    let provider = provider_with(Arc::new(StaticDiscovery::populated()), builder.clone());
    let unit_bundle = TestBundle::new(12, "ledger")
        .with_type("ledger::Ledger", OwnerType::of::<Ledger>())
        .shared();
    let info = TestUnitInfo {
        name: "accounts".to_string(),
        resolver: Arc::new(BundleTypeResolver::new(unit_bundle)),
    };

    let factory = provider.create_container_persistence_unit(&info, None).unwrap();

    assert_eq!(factory.unit_name(), "accounts");
    let observation = builder.last_observation();
    assert_eq!(observation.scanned_types, vec!["ledger::Ledger"]);
    assert_eq!(observation.ambient_bundle.as_deref(), Some("shop"));
    assert!(ambient::current().is_none());
}

#[test]
fn test_container_build_without_boundary_fails_before_builder() {
    let builder = Arc::new(RecordingBuilder::new(BuildOutcome::Succeed));
    let discovery = Arc::new(StaticDiscovery::populated());
    let provider = provider_with(discovery.clone(), builder.clone());
    let info = TestUnitInfo {
        name: "accounts".to_string(),
        resolver: Arc::new(DetachedResolver),
    };

    let error = provider
        .create_container_persistence_unit(&info, None)
        .unwrap_err();

    assert!(matches!(error, Error::BoundaryResolution { .. }));
    assert!(error.to_string().contains("accounts"));
    assert_eq!(builder.calls.load(Ordering::SeqCst), 0);
    assert_eq!(discovery.queries.load(Ordering::SeqCst), 0);
    assert!(ambient::current().is_none());
}

#[test]
fn test_container_build_error_propagates() {
    let provider = provider_with(
        Arc::new(StaticDiscovery::populated()),
        Arc::new(RecordingBuilder::new(BuildOutcome::Fail)),
    );
    let info = TestUnitInfo {
        name: "accounts".to_string(),
        resolver: Arc::new(BundleTypeResolver::new(TestBundle::new(2, "ledger").shared())),
    };

    let error = provider
        .create_container_persistence_unit(&info, None)
        .unwrap_err();
    assert!(matches!(error, Error::Builder { .. }));
    assert!(ambient::current().is_none());
}

// ============================================================================
// Service factory
// ============================================================================

#[test]
fn test_service_hands_out_provider_per_bundle() {
    let builder = Arc::new(RecordingBuilder::new(BuildOutcome::Succeed));
    let service = BundlePersistenceProviderService::new(
        Arc::new(TestPlatform("host-jta")),
        Arc::new(StaticDiscovery::populated()),
        builder.clone(),
    );

    let inventory = TestBundle::new(20, "inventory").shared();
    let provider = service.provider_for(Arc::clone(&inventory));
    assert_eq!(provider.requesting_bundle().symbolic_name(), "inventory");

    provider.create_persistence_unit("stock", None).unwrap();
    assert_eq!(
        builder.last_observation().ambient_bundle.as_deref(),
        Some("inventory")
    );

    service.release(inventory.as_ref(), provider);
}
