//! Configuration loader tests

use std::env;
use std::fs;

use pubind_domain::error::Error;
use pubind_infrastructure::config::{AccessorCacheConfig, AppConfig, ConfigLoader};
use pubind_infrastructure::constants::DEFAULT_LOG_LEVEL;
use tempfile::TempDir;

/// Prefix no other test uses, so env overrides stay local to one test
fn isolated_loader(prefix: &str) -> ConfigLoader {
    ConfigLoader::new().with_env_prefix(prefix)
}

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
    assert_eq!(config.accessor_cache, AccessorCacheConfig::default());
    assert!(config.accessor_cache.time_to_idle().is_some());
    assert!(config.accessor_cache.install_global);
    assert!(config.discovery.include_linked);
}

#[test]
fn test_zero_idle_disables_expiry() {
    let config = AccessorCacheConfig {
        max_capacity: 10,
        time_to_idle_secs: 0,
        install_global: false,
    };
    assert!(config.time_to_idle().is_none());
}

#[test]
fn test_load_from_toml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pubind.toml");
    fs::write(
        &path,
        r#"
[logging]
level = "debug"

[accessor_cache]
max_capacity = 250

[discovery]
include_linked = false
"#,
    )
    .unwrap();

    let config = isolated_loader("PUBIND_TEST_FILE")
        .with_config_path(&path)
        .load()
        .unwrap();

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.accessor_cache.max_capacity, 250);
    // Keys absent from the file keep their defaults
    assert_eq!(
        config.accessor_cache.time_to_idle_secs,
        AccessorCacheConfig::default().time_to_idle_secs
    );
    assert!(!config.discovery.include_linked);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let loader =
        isolated_loader("PUBIND_TEST_MISSING").with_config_path(dir.path().join("absent.toml"));

    let config = loader.load().unwrap();
    assert_eq!(config.accessor_cache, AccessorCacheConfig::default());
    assert!(loader.config_path().is_some());
}

#[test]
#[allow(unsafe_code)]
fn test_env_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pubind.toml");
    fs::write(&path, "[accessor_cache]\nmax_capacity = 250\n").unwrap();

    // SAFETY: the variable uses a prefix no other test reads
    unsafe {
        env::set_var("PUBIND_TEST_ENV__ACCESSOR_CACHE__MAX_CAPACITY", "777");
    }
    let config = isolated_loader("PUBIND_TEST_ENV")
        .with_config_path(&path)
        .load();
    unsafe {
        env::remove_var("PUBIND_TEST_ENV__ACCESSOR_CACHE__MAX_CAPACITY");
    }

    assert_eq!(config.unwrap().accessor_cache.max_capacity, 777);
}

#[test]
fn test_zero_capacity_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pubind.toml");
    fs::write(&path, "[accessor_cache]\nmax_capacity = 0\n").unwrap();

    let err = isolated_loader("PUBIND_TEST_ZERO")
        .with_config_path(&path)
        .load()
        .unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_invalid_log_level_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pubind.toml");
    fs::write(&path, "[logging]\nlevel = \"chatty\"\n").unwrap();

    let err = isolated_loader("PUBIND_TEST_LEVEL")
        .with_config_path(&path)
        .load()
        .unwrap_err();
    assert!(err.to_string().contains("Invalid log level"));
}

#[test]
fn test_malformed_file_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pubind.toml");
    fs::write(&path, "[accessor_cache]\nmax_capacity = \"many\"\n").unwrap();

    let err = isolated_loader("PUBIND_TEST_MALFORMED")
        .with_config_path(&path)
        .load()
        .unwrap_err();
    match err {
        Error::Configuration { message, source } => {
            assert!(message.contains("Failed to extract configuration"));
            assert!(source.is_some());
        }
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saved.toml");
    let mut config = AppConfig::default();
    config.accessor_cache.max_capacity = 64;
    config.logging.json_format = true;

    let loader = isolated_loader("PUBIND_TEST_SAVE");
    loader.save_to_file(&config, &path).unwrap();
    let loaded = loader.with_config_path(&path).load().unwrap();

    assert_eq!(loaded.accessor_cache.max_capacity, 64);
    assert!(loaded.logging.json_format);
}
