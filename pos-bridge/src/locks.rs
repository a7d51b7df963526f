//! Per-order serialization
//!
//! Two push events for the same order id must not interleave, or a
//! stale-version overwrite race appears. Events for different orders
//! stay independent.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Async lock table keyed by platform order id.
#[derive(Clone, Default)]
pub struct OrderLocks {
    inner: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl OrderLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the lock for an order id, creating it on first use. Locks
    /// are never evicted; the set of in-flight orders is small.
    pub async fn lock(&self, order_id: &str) -> OwnedMutexGuard<()> {
        let mutex = self
            .inner
            .entry(order_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone();
        mutex.lock_owned().await
    }
}
