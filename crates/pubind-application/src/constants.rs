//! Application layer constants

/// Default number of entries retained per accessor map
pub const ACCESSOR_CACHE_DEFAULT_CAPACITY: u64 = 10_000;

/// Default idle time after which an accessor entry may be reclaimed (1 hour)
pub const ACCESSOR_CACHE_DEFAULT_IDLE_SECS: u64 = 3600;

/// Mapping descriptor suffixes recognized by the bundle scanner
pub const MAPPING_FILE_SUFFIXES: [&str; 2] = ["orm.xml", "hbm.xml"];

/// Separator between a type's module path and its simple name
pub const TYPE_PATH_SEPARATOR: &str = "::";
