//! Cache Module
//!
//! The TTL cache engine: concurrent map, per-entry lifecycle, statistics.

mod entry;
mod map;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use map::TtlMap;
pub use stats::CacheStats;
