//! Cache Entry Module
//!
//! Defines the structure for individual cache entries.

use tokio::task::AbortHandle;

// == Cache Entry ==
/// A single cached value together with the identity and cancellation state
/// of its expiration watcher.
///
/// The payload is opaque to the cache. The generation number identifies this
/// particular entry: a watcher bound to generation `g` may only remove the
/// entry at its key while that entry still carries `g`, so a watcher left
/// over from an overwritten entry can never delete its successor.
#[derive(Debug)]
pub struct Entry<V> {
    /// The stored value
    pub value: V,
    /// Identity of this entry, unique per map for the life of the process
    pub generation: u64,
    /// Handle that cancels this entry's pending expiration watcher
    abort: AbortHandle,
}

impl<V> Entry<V> {
    /// Creates an entry bound to the watcher behind `abort`.
    pub fn new(value: V, generation: u64, abort: AbortHandle) -> Self {
        Self {
            value,
            generation,
            abort,
        }
    }

    // == Cancel ==
    /// Stops the entry's pending expiration watcher.
    ///
    /// Advisory: it never retracts a deletion the watcher already started.
    /// Safe to call more than once, and safe to call after the watcher has
    /// fired; a fired or cancelled watcher takes no further action.
    pub fn cancel(&self) {
        self.abort.abort();
    }
}
