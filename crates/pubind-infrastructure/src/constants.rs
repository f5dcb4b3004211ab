//! Infrastructure constants

// ============================================================================
// Configuration
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "pubind.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "pubind";

/// Prefix of environment variables overriding configuration
pub const CONFIG_ENV_PREFIX: &str = "PUBIND";

// ============================================================================
// Logging
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding an `EnvFilter` directive
pub const LOG_FILTER_ENV: &str = "PUBIND_LOG";

/// File stem used when the configured log path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "pubind";

/// Maximum number of daily log files kept
pub const LOG_MAX_FILES: usize = 5;

// ============================================================================
// Service registry
// ============================================================================

/// Ranking of services registered without an explicit one
pub const DEFAULT_SERVICE_RANKING: i32 = 0;
