//! ttlmap - An in-process key-value cache with per-entry TTL expiration
//!
//! Entries live in one concurrent map guarded by a reader/writer lock. Every
//! insert schedules a suspended watcher task bound to the entry's deadline;
//! the watcher deletes the entry when its lifetime elapses unless a read
//! consumed it or a delete (or an overwriting insert) cancelled it first.
//! There is no periodic sweep.
//!
//! [`TtlMap`] is the engine and takes its handle explicitly; [`instance`]
//! exposes the one process-wide cache shared by all callers.

pub mod cache;
pub mod config;
pub mod instance;

pub(crate) mod tasks;

pub use cache::{CacheStats, TtlMap};
pub use config::{ttl_duration, Config, DEFAULT_TTL_SECS};
pub use instance::{instance, SharedValue};
