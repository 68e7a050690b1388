//! Cache configuration.
//!
//! Every bounded policy shares one knob: the maximum number of items a store
//! may hold. It defaults to [`DEFAULT_MAX_ITEMS`] and can be overridden in
//! code or through the `EVICTKIT_MAX_ITEMS` environment variable.
//!
//! ## Example
//!
//! ```
//! use evictkit::config::{CacheConfig, DEFAULT_MAX_ITEMS};
//! use evictkit::policy::fifo::FifoCache;
//!
//! let config = CacheConfig::default();
//! assert_eq!(config.max_items, DEFAULT_MAX_ITEMS);
//!
//! let cache: FifoCache<&str, i32> = FifoCache::with_config(&config);
//! assert_eq!(cache.capacity(), 4);
//! ```

use std::env;

use crate::error::{ConfigError, check_capacity};

/// Default bound shared by every cache store.
pub const DEFAULT_MAX_ITEMS: usize = 4;

/// Environment variable consulted by [`CacheConfig::from_env`].
pub const MAX_ITEMS_ENV: &str = "EVICTKIT_MAX_ITEMS";

/// Configuration shared by all bounded cache policies.
///
/// | Field       | Type    | Default | Description                   |
/// |-------------|---------|---------|-------------------------------|
/// | `max_items` | `usize` | 4       | Maximum entries in the store  |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries a store may hold once an operation returns.
    pub max_items: usize,
}

impl CacheConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `max_items` is zero.
    pub fn new(max_items: usize) -> Result<Self, ConfigError> {
        let config = Self { max_items };
        config.validate()?;
        Ok(config)
    }

    /// Loads the configuration from `EVICTKIT_MAX_ITEMS`.
    ///
    /// An unset variable yields the default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the variable is set but is not a positive
    /// integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(MAX_ITEMS_ENV) {
            Ok(raw) => Self::parse_max_items(&raw),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(env::VarError::NotUnicode(_)) => Err(ConfigError::new(format!(
                "{MAX_ITEMS_ENV} is not valid unicode"
            ))),
        }
    }

    fn parse_max_items(raw: &str) -> Result<Self, ConfigError> {
        let max_items = raw.trim().parse::<usize>().map_err(|err| {
            ConfigError::new(format!("{MAX_ITEMS_ENV}={raw:?} is not a valid capacity: {err}"))
        })?;
        Self::new(max_items)
    }

    /// Checks that the configuration describes a usable cache.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `max_items` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_capacity(self.max_items)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
        }
    }
}
