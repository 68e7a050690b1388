//! Error types for the evictkit library.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Returned when a policy's order structure falls out of
//!   lockstep with its table (`check_invariants` methods).
//! - [`ConfigError`]: Returned when cache configuration is invalid
//!   (zero capacity, unparsable environment value).
//!
//! Neither error is produced by `put` or `get`: a `None` key, a `None` item
//! and a missing key are all ordinary outcomes, not failures.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::error::ConfigError;
//! use evictkit::policy::fifo::FifoCache;
//!
//! // Fallible constructor for user-configurable capacity
//! let cache: Result<FifoCache<String, i32>, ConfigError> = FifoCache::try_new(4);
//! assert!(cache.is_ok());
//!
//! // Zero capacity is caught without panicking
//! let bad = FifoCache::<String, i32>::try_new(0);
//! assert!(bad.is_err());
//! ```

use thiserror::Error;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by `check_invariants` methods on cache types
/// (e.g. [`LfuCache::check_invariants`](crate::policy::lfu::LfuCache::check_invariants)).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`LfuCache::try_new`](crate::policy::lfu::LfuCache::try_new),
/// [`CacheConfig::from_env`](crate::config::CacheConfig::from_env) and
/// [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build).
///
/// # Example
///
/// ```
/// use evictkit::error::ConfigError;
/// use evictkit::policy::lifo::LifoCache;
///
/// let err = LifoCache::<u64, u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Rejects a zero capacity with the message every constructor shares.
pub(crate) fn check_capacity(capacity: usize) -> Result<(), ConfigError> {
    if capacity == 0 {
        tracing::warn!(capacity, "rejected cache configuration");
        return Err(ConfigError::new("capacity must be greater than zero"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
