//! Regeneration entry point and refresh scheduling.

use crate::processing::assemble;
use crate::registry::Registry;
use crate::store::SnapshotStore;
use rand::Rng;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Owns the registry transport and the configured network list, and runs
/// regenerations against the shared [`SnapshotStore`].
///
/// A mutex serializes runs: a trigger arriving while a run is in flight
/// queues behind it, so no two runs race to publish.
pub struct FeedGenerator {
    registry: Box<dyn Registry + Send + Sync>,
    networks: Vec<String>,
    store: Arc<SnapshotStore>,
    run_lock: Mutex<()>,
}

impl FeedGenerator {
    pub fn new(
        registry: Box<dyn Registry + Send + Sync>,
        networks: Vec<String>,
        store: Arc<SnapshotStore>,
    ) -> FeedGenerator {
        FeedGenerator {
            registry,
            networks,
            store,
            run_lock: Mutex::new(()),
        }
    }

    /// Run one full generation and publish the result. Synchronous;
    /// returns once the run has completed and the store is updated.
    pub fn regenerate(&self) {
        let _guard = self
            .run_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        log::info!("Generating geofeed...");
        let snapshot = assemble(&self.networks, self.registry.as_ref());
        self.store.publish(snapshot);
        log::info!("Geofeed generation done");
    }
}

/// Spawn the background refresh loop: sleep a random whole number of hours
/// in `[min_hours, max_hours]`, regenerate, repeat.
///
/// The jitter spreads registry load across feed operators instead of
/// hitting the database on synchronized schedules.
pub fn spawn_refresh_scheduler(
    generator: Arc<FeedGenerator>,
    min_hours: u64,
    max_hours: u64,
) -> thread::JoinHandle<()> {
    thread::spawn(move || loop {
        let hours = rand::thread_rng().gen_range(min_hours..=max_hours);
        log::info!("Next geofeed refresh in {hours} hours");
        thread::sleep(Duration::from_secs(hours * 3600));
        generator.regenerate();
    })
}
