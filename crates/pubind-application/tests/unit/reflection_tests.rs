//! Reflection helper tests

use std::sync::Arc;

use pubind_application::reflection::{find_property, find_property_with, load_type};
use pubind_application::{BundleTypeResolver, with_boundary};
use pubind_domain::ports::{DeclaredProperty, PropertyMetadataSource};
use pubind_domain::{AccessType, Error, OwnerType};

use crate::test_utils::{DetachedResolver, Order, TestBundle};

struct OrderMetadata;

impl PropertyMetadataSource for OrderMetadata {
    fn declared_properties(&self, owner: OwnerType, access_type: AccessType) -> Vec<DeclaredProperty> {
        if owner != OwnerType::of::<Order>() {
            return Vec::new();
        }
        let names: &[&str] = match access_type {
            AccessType::Field => &["total", "note"],
            AccessType::Property => &["note", "summary"],
        };
        names
            .iter()
            .map(|name| DeclaredProperty {
                name: (*name).to_string(),
                access_type,
                writable: *name != "summary",
            })
            .collect()
    }
}

#[test]
fn test_find_property_prefers_field_access() {
    let property = find_property(&OrderMetadata, OwnerType::of::<Order>(), "note").unwrap();
    assert_eq!(property.access_type, AccessType::Field);
}

#[test]
fn test_find_property_falls_back_to_property_access() {
    let property = find_property(&OrderMetadata, OwnerType::of::<Order>(), "summary").unwrap();
    assert_eq!(property.access_type, AccessType::Property);
    assert!(!property.writable);
}

#[test]
fn test_find_property_missing() {
    assert!(find_property(&OrderMetadata, OwnerType::of::<Order>(), "discount").is_none());
    assert!(find_property(&OrderMetadata, OwnerType::of::<String>(), "total").is_none());
}

#[test]
fn test_find_property_with_is_strict() {
    let owner = OwnerType::of::<Order>();
    assert!(find_property_with(&OrderMetadata, owner, "total", AccessType::Field).is_some());
    assert!(find_property_with(&OrderMetadata, owner, "total", AccessType::Property).is_none());
}

#[test]
fn test_load_type_with_explicit_resolver() {
    let bundle = TestBundle::new(1, "orders")
        .with_type("orders::Order", OwnerType::of::<Order>())
        .shared();
    let resolver = BundleTypeResolver::new(bundle);

    assert_eq!(
        load_type("orders::Order", Some(&resolver)).unwrap(),
        OwnerType::of::<Order>()
    );
}

#[test]
fn test_load_type_uses_ambient_resolver() {
    let bundle = TestBundle::new(1, "orders")
        .with_type("orders::Order", OwnerType::of::<Order>())
        .shared();

    let loaded = with_boundary(Arc::new(BundleTypeResolver::new(bundle)), || {
        load_type("orders::Order", None)
    })
    .unwrap();
    assert_eq!(loaded, OwnerType::of::<Order>());
}

#[test]
fn test_load_type_without_any_resolver_fails() {
    let error = load_type("orders::Order", None).unwrap_err();
    match error {
        Error::TypeLoading { name, .. } => assert_eq!(name, "orders::Order"),
        other => panic!("Expected TypeLoading error, got {other:?}"),
    }
}

#[test]
fn test_load_type_reports_resolver_failure() {
    let error = load_type("orders::Order", Some(&DetachedResolver)).unwrap_err();
    assert!(matches!(error, Error::TypeLoading { .. }));
}
