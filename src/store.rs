//! Snapshot store: single-writer, many-reader feed cache.

use crate::models::Snapshot;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// Holds the current [`Snapshot`] behind an atomically swapped pointer.
///
/// Readers get an `Arc` to a fully-built immutable snapshot and are never
/// blocked by (or exposed to) an in-flight regeneration; a replacement is
/// one pointer swap.
pub struct SnapshotStore {
    current: ArcSwap<Snapshot>,
}

impl SnapshotStore {
    /// Create a store holding the not-ready placeholder snapshot.
    pub fn new() -> SnapshotStore {
        SnapshotStore {
            current: ArcSwap::from_pointee(Snapshot::default()),
        }
    }

    /// The latest published snapshot.
    pub fn current(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    /// Unconditionally publish a new snapshot.
    pub fn replace(&self, snapshot: Snapshot) {
        self.current.store(Arc::new(snapshot));
    }

    /// Publish a freshly generated snapshot, keeping the previous one if
    /// the new result is empty while a good feed is already being served.
    ///
    /// A run in which every supernet failed produces an empty snapshot;
    /// adopting it would mask a previously good feed with a 503 until the
    /// next successful run.
    pub fn publish(&self, snapshot: Snapshot) {
        if snapshot.allocations.is_empty() && self.current.load().is_ready() {
            log::warn!("generation run produced no allocations, keeping previous snapshot");
            return;
        }
        self.replace(snapshot);
    }
}

impl Default for SnapshotStore {
    fn default() -> SnapshotStore {
        SnapshotStore::new()
    }
}
