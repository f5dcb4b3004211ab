//! Domain constants
//!
//! Settings keys recognized by the provider composition and the textual
//! tags of the two access strategies.

// ============================================================================
// SETTINGS KEYS
// ============================================================================

/// Transaction-platform bridge bound by the hosting runtime
pub const TRANSACTION_PLATFORM: &str = "pubind.transaction.platform";

/// Deferred list of integrators
pub const INTEGRATOR_PROVIDER: &str = "pubind.integrator_provider";

/// Deferred list of strategy-registration providers
pub const STRATEGY_REGISTRATION_PROVIDERS: &str = "pubind.strategy_registration_providers";

/// Deferred list of type contributors
pub const TYPE_CONTRIBUTORS: &str = "pubind.type_contributors";

/// Resource scanner used for entity and mapping discovery
pub const SCANNER: &str = "pubind.archive.scanner";

/// All keys the composition overwrites, in insertion order
pub const RECOGNIZED_SETTINGS_KEYS: [&str; 5] = [
    TRANSACTION_PLATFORM,
    INTEGRATOR_PROVIDER,
    STRATEGY_REGISTRATION_PROVIDERS,
    TYPE_CONTRIBUTORS,
    SCANNER,
];

// ============================================================================
// ACCESS STRATEGY TAGS
// ============================================================================

/// Direct field access
pub const ACCESS_TYPE_FIELD: &str = "field";

/// Accessor-method access
pub const ACCESS_TYPE_PROPERTY: &str = "property";
