//! Shared Tracker Handle
//!
//! Concurrency adaptation for multi-threaded hosts: all access is
//! serialized behind one lock guarding the ledger and every deque
//! together, so the multi-step update inside `record` (ledger append,
//! per-window deque update, expiry) appears atomic to concurrent readers.
//! A reader can never observe a deque mid-eviction relative to the ledger.
//!
//! Writers take the write lock for `record`/`advance_to`; `query` only
//! reads deque fronts, so readers share the read lock.

use crate::engine::clock::Millis;
use crate::engine::tracker::{RollingExtremaTracker, TrackerError, WindowExtrema, WindowSpec};
use parking_lot::RwLock;
use std::sync::Arc;

/// Cloneable handle to a lock-guarded [`RollingExtremaTracker`].
#[derive(Clone)]
pub struct SharedTracker {
    inner: Arc<RwLock<RollingExtremaTracker>>,
}

impl SharedTracker {
    pub fn new(tracker: RollingExtremaTracker) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tracker)),
        }
    }

    pub fn record(&self, price: f64, at: Millis) -> Result<(), TrackerError> {
        self.inner.write().record(price, at)
    }

    pub fn advance_to(&self, now: Millis) -> Result<(), TrackerError> {
        self.inner.write().advance_to(now)
    }

    pub fn query(&self, window_id: &str) -> Result<WindowExtrema, TrackerError> {
        self.inner.read().query(window_id)
    }

    /// Extrema for every configured window under a single read lock.
    pub fn snapshot(&self) -> Vec<(WindowSpec, WindowExtrema)> {
        self.inner.read().snapshot()
    }

    pub fn live_samples(&self) -> usize {
        self.inner.read().live_samples()
    }

    pub fn now(&self) -> Option<Millis> {
        self.inner.read().now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::clock::MS_PER_MIN;

    fn tracker() -> RollingExtremaTracker {
        RollingExtremaTracker::new(vec![WindowSpec::new("5m", 5 * MS_PER_MIN)]).unwrap()
    }

    #[test]
    fn test_clones_share_state() {
        let writer = SharedTracker::new(tracker());
        let reader = writer.clone();

        writer.record(101.5, 1_000).unwrap();
        let extrema = reader.query("5m").unwrap();
        assert_eq!(extrema.min, Some(101.5));
        assert_eq!(extrema.max, Some(101.5));
    }

    #[test]
    fn test_reader_thread_observes_writes() {
        let writer = SharedTracker::new(tracker());
        let reader = writer.clone();

        for i in 0..10 {
            writer.record(100.0 + i as f64, i * 1_000).unwrap();
        }
        let handle = std::thread::spawn(move || reader.query("5m").unwrap());
        let extrema = handle.join().unwrap();
        assert_eq!(extrema.min, Some(100.0));
        assert_eq!(extrema.max, Some(109.0));
    }

    #[test]
    fn test_snapshot_is_consistent() {
        let shared = SharedTracker::new(tracker());
        shared.record(55.0, 0).unwrap();
        shared.record(42.0, 1_000).unwrap();

        let snapshot = shared.snapshot();
        assert_eq!(snapshot.len(), 1);
        let (spec, extrema) = &snapshot[0];
        assert_eq!(spec.id, "5m");
        assert_eq!(extrema.min, Some(42.0));
        assert_eq!(extrema.max, Some(55.0));
        assert_eq!(shared.live_samples(), 2);
        assert_eq!(shared.now(), Some(1_000));
    }
}
