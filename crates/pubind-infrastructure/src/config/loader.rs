//! Configuration loader
//!
//! Sources are merged in this order, later ones overriding earlier ones:
//!
//! 1. `AppConfig::default()`
//! 2. a TOML file (explicit path, else `pubind.toml` in the current
//!    directory or in `pubind/` under it)
//! 3. environment variables prefixed `PUBIND__`, with `__` separating
//!    nested keys (`PUBIND__ACCESSOR_CACHE__MAX_CAPACITY=500`)

use std::env;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use pubind_domain::error::{Error, Result};

use crate::config::AppConfig;
use crate::constants::{CONFIG_ENV_PREFIX, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    /// Loader with the default search paths and env prefix
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Load from this file instead of searching the default locations
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix (without the trailing `__`)
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// The explicit configuration file path, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Load and validate configuration from all sources
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            let found = config_path.exists();
            if found {
                figment = figment.merge(Toml::file(config_path));
            }
            log_config_loaded(config_path, found);
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        figment = figment.merge(Env::prefixed(&format!("{}__", self.env_prefix)).split("__"));

        let config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&config)?;
        Ok(config)
    }

    /// Write `config` as TOML to `path`
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;
        std::fs::write(path.as_ref(), toml_string).io_context(format!(
            "Failed to write config file {}",
            path.as_ref().display()
        ))?;
        Ok(())
    }

    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;
        [
            current_dir.join(DEFAULT_CONFIG_FILENAME),
            current_dir
                .join(DEFAULT_CONFIG_DIR)
                .join(DEFAULT_CONFIG_FILENAME),
        ]
        .into_iter()
        .find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate every configuration section
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    parse_log_level(&config.logging.level)?;
    if config.accessor_cache.max_capacity == 0 {
        return Err(Error::configuration(
            "Accessor cache capacity cannot be 0",
        ));
    }
    if config.logging.file_output.is_some() && config.logging.max_files == 0 {
        return Err(Error::configuration(
            "Maximum log files cannot be 0 when file output is enabled",
        ));
    }
    Ok(())
}
