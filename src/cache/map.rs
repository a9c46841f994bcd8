//! TTL Map Module
//!
//! The cache engine: a concurrent map with one expiration watcher per entry.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::cache::entry::Entry;
use crate::cache::stats::{CacheStats, StatsCounters};
use crate::tasks::spawn_expiry_watcher;

// == TTL Map ==
/// Key-value cache in which every entry expires a fixed duration after it
/// was inserted.
///
/// One reader/writer lock guards the whole map: mutation happens only under
/// the exclusive lock, lookups under the shared lock. Each insert schedules
/// a suspended watcher task bound to the new entry's deadline and generation;
/// the watcher removes the entry when the deadline elapses unless a read
/// consumed it, a delete removed it, or an overwriting insert cancelled it
/// first. There is no periodic sweep.
///
/// Reads consume: a successful [`get`](TtlMap::get) removes the entry, so a
/// key yields its value at most once per insert.
#[derive(Debug)]
pub struct TtlMap<V> {
    /// Key-value storage, one live entry per key
    entries: RwLock<HashMap<String, Entry<V>>>,
    /// Lifetime applied to every entry
    ttl: Duration,
    /// Source of entry identities
    next_generation: AtomicU64,
    /// Activity counters
    counters: StatsCounters,
    /// Handle given to watcher tasks; weak, so outstanding watchers never
    /// keep a dropped map alive
    weak_self: Weak<TtlMap<V>>,
}

impl<V: Send + Sync + 'static> TtlMap<V> {
    // == Constructor ==
    /// Creates a map whose entries live for `ttl` after insertion.
    ///
    /// Returns a shared handle; inserts hand a weak clone of it to each
    /// entry's watcher task.
    pub fn new(ttl: Duration) -> Arc<Self> {
        Arc::new_cyclic(|weak_self| Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            next_generation: AtomicU64::new(0),
            counters: StatsCounters::default(),
            weak_self: weak_self.clone(),
        })
    }

    /// The fixed per-entry lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Set ==
    /// Stores a value under `key`, replacing any existing entry.
    ///
    /// Never fails and never merges: the previous entry at `key`, if any, is
    /// dropped and its watcher cancelled. The empty string is an ordinary
    /// key. Once `set` returns, the entry is visible to every caller and its
    /// watcher is scheduled for `now + ttl`.
    pub async fn set(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let deadline = Instant::now() + self.ttl;

        let mut entries = self.entries.write().await;
        // Spawned while the exclusive lock is held: the watcher cannot win
        // the lock before the insert below lands, even with a zero TTL.
        let abort = spawn_expiry_watcher(self.weak_self.clone(), key.clone(), generation, deadline);
        debug!(key = %key, generation, "set");
        if let Some(old) = entries.insert(key, Entry::new(value, generation, abort)) {
            old.cancel();
        }
        drop(entries);

        self.counters.record_insert();
    }

    // == Get ==
    /// Retrieves and consumes the value stored under `key`.
    ///
    /// Returns `None` for absent keys, with no side effects. On a hit the
    /// entry is removed and its watcher cancelled, so a second `get` of the
    /// same key finds nothing until the next `set`.
    ///
    /// The lookup is a single atomic snapshot under the shared lock; the
    /// removal afterwards is generation-checked, so if the entry's watcher
    /// fires in between, or a new `set` lands on the key, nothing but the
    /// entry that was read is removed.
    pub async fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        let found = {
            let entries = self.entries.read().await;
            entries
                .get(key)
                .map(|entry| (entry.value.clone(), entry.generation))
        };

        match found {
            Some((value, generation)) => {
                self.remove_if_current(key, generation).await;
                self.counters.record_hit();
                debug!(key, "get hit");
                Some(value)
            }
            None => {
                self.counters.record_miss();
                debug!(key, "get miss");
                None
            }
        }
    }

    // == Delete ==
    /// Removes the entry stored under `key`, cancelling its watcher.
    ///
    /// Silent no-op if the key is absent.
    pub async fn delete(&self, key: &str) {
        let removed = {
            let mut entries = self.entries.write().await;
            entries.remove(key)
        };

        if let Some(entry) = removed {
            // Cancellation happens outside the lock; it is advisory and
            // never retracts a removal already in flight.
            entry.cancel();
            debug!(key, "deleted");
        }
    }

    // == Expire ==
    /// Watcher-fire path: removes the entry at `key` only if it still
    /// carries `generation`.
    pub(crate) async fn expire(&self, key: &str, generation: u64) {
        if self.remove_if_current(key, generation).await {
            self.counters.record_expiration();
            debug!(key, generation, "entry expired");
        }
    }

    /// Removes the entry at `key` if its generation matches, returning
    /// whether a removal happened.
    ///
    /// The generation check is what makes by-key deletion safe: a watcher or
    /// consuming read bound to a replaced entry can never remove the entry
    /// that superseded it.
    async fn remove_if_current(&self, key: &str, generation: u64) -> bool {
        let removed = {
            let mut entries = self.entries.write().await;
            match entries.get(key) {
                Some(entry) if entry.generation == generation => entries.remove(key),
                _ => None,
            }
        };

        match removed {
            Some(entry) => {
                entry.cancel();
                true
            }
            None => false,
        }
    }

    // == Stats ==
    /// Returns a point-in-time snapshot of cache activity.
    pub async fn stats(&self) -> CacheStats {
        let total_entries = self.entries.read().await.len();
        self.counters.snapshot(total_entries)
    }

    // == Length ==
    /// Returns the current number of live entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if the map holds no live entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
