//! Configuration Module
//!
//! Handles the single cache configuration knob: the fixed entry TTL.

use std::env;
use std::time::Duration;

/// Default entry lifetime in seconds.
pub const DEFAULT_TTL_SECS: u64 = 30;

/// Cache configuration.
///
/// The cache has exactly one knob: the TTL applied to every entry. It is
/// fixed at construction time and is not a per-call or per-key parameter.
#[derive(Debug, Clone)]
pub struct Config {
    /// Entry lifetime in seconds
    pub ttl_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_SECS` - Entry TTL in seconds (default: 30)
    pub fn from_env() -> Self {
        Self {
            ttl_secs: env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TTL_SECS),
        }
    }

    /// The configured TTL as a [`Duration`].
    pub fn ttl(&self) -> Duration {
        ttl_duration(self.ttl_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_TTL_SECS,
        }
    }
}

// == Utility Functions ==
/// Converts a second count into a [`Duration`].
///
/// Pure helper with no error cases; every TTL deadline in the cache is
/// derived from the duration this returns.
pub fn ttl_duration(secs: u64) -> Duration {
    Duration::from_secs(secs)
}
