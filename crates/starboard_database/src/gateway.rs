//! The process-wide storage gate.
//!
//! One store, one mutex. Every reconciliation and every configuration edit
//! holds the gate for its whole critical section, so storage reads and writes
//! from different tasks never interleave. Tokio's mutex queues waiters in FIFO
//! order, so no task starves.

use starboard_interface::StarboardStore;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, trace};

/// Serialises all access to a [`StarboardStore`].
///
/// # Example
/// ```
/// use starboard_database::{Gateway, InMemoryStarboardStore};
/// use starboard_core::{MessageId, StarboardId};
/// use starboard_interface::StarboardStore;
///
/// let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// rt.block_on(async {
///     let gateway = Gateway::new(InMemoryStarboardStore::new());
///     let mut store = gateway.acquire().await;
///     assert!(store.get_mapping(StarboardId(1), MessageId(2)).unwrap().is_none());
/// });
/// ```
pub struct Gateway<S> {
    store: Arc<Mutex<S>>,
}

impl<S> Clone for Gateway<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: StarboardStore> Gateway<S> {
    /// Put `store` behind the gate.
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Wait for exclusive access to the store.
    ///
    /// The gate is released when the returned guard drops, including on early
    /// returns and `?` propagation.
    pub async fn acquire(&self) -> GateGuard<'_, S> {
        let requested = Instant::now();
        let guard = self.store.lock().await;
        let waited = requested.elapsed();
        if waited.as_millis() > 0 {
            debug!(waited_ms = waited.as_millis() as u64, "Acquired storage gate");
        }
        GateGuard {
            guard,
            acquired_at: Instant::now(),
        }
    }
}

/// Exclusive access to the store for the lifetime of the guard.
pub struct GateGuard<'a, S> {
    guard: MutexGuard<'a, S>,
    acquired_at: Instant,
}

impl<S> Deref for GateGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.guard
    }
}

impl<S> DerefMut for GateGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.guard
    }
}

impl<S> Drop for GateGuard<'_, S> {
    fn drop(&mut self) {
        trace!(
            held_ms = self.acquired_at.elapsed().as_millis() as u64,
            "Released storage gate"
        );
    }
}
