//! Process-Wide Instance Module
//!
//! Zero-argument accessor for the one cache instance shared by all callers
//! in the process.

use std::any::Any;
use std::sync::{Arc, OnceLock};

use crate::cache::TtlMap;
use crate::config::Config;

/// Payload type stored by the shared instance.
///
/// Values are opaque to the cache; callers downcast on the way out with
/// [`Arc::downcast`].
pub type SharedValue = Arc<dyn Any + Send + Sync>;

static INSTANCE: OnceLock<Arc<TtlMap<SharedValue>>> = OnceLock::new();

/// Returns the process-wide cache instance, constructing it on first use.
///
/// Construction runs exactly once; concurrent first-time callers all observe
/// the same instance. The TTL is read from the environment at that moment
/// (see [`Config::from_env`]) and fixed for the life of the process. The
/// instance is never torn down.
pub fn instance() -> &'static Arc<TtlMap<SharedValue>> {
    INSTANCE.get_or_init(|| TtlMap::new(Config::from_env().ttl()))
}
