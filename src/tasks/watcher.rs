//! Expiration Watcher Task
//!
//! Background task that tracks a single entry's deadline and deletes the
//! entry when the deadline elapses.

use std::sync::Weak;

use tokio::task::AbortHandle;
use tokio::time::Instant;
use tracing::trace;

use crate::cache::TtlMap;

/// Spawns the expiration watcher for one entry.
///
/// The task suspends until `deadline` (no polling), then removes the entry
/// at `key` from the map, provided the entry there still carries
/// `generation`. The returned [`AbortHandle`] is the entry's cancellation
/// handle: aborting it stops the pending deletion without touching the map.
///
/// Every `set` call spawns exactly one watcher. A watcher either fires once
/// or is cancelled; it can never delete an entry other than the one it was
/// created for. The map handle is weak: watchers outliving the map do
/// nothing at their deadline.
pub(crate) fn spawn_expiry_watcher<V>(
    cache: Weak<TtlMap<V>>,
    key: String,
    generation: u64,
    deadline: Instant,
) -> AbortHandle
where
    V: Send + Sync + 'static,
{
    let task = tokio::spawn(async move {
        trace!(key = %key, generation, "watcher waiting");
        tokio::time::sleep_until(deadline).await;
        if let Some(cache) = cache.upgrade() {
            cache.expire(&key, generation).await;
        }
    });

    task.abort_handle()
}
