//! Background Tasks Module
//!
//! The only background activity in the cache is the per-entry expiration
//! watcher; one is spawned for every insert.

mod watcher;

pub(crate) use watcher::spawn_expiry_watcher;
