use ripe_geofeed::config::Config;
use ripe_geofeed::generator::{spawn_refresh_scheduler, FeedGenerator};
use ripe_geofeed::registry::RipeClient;
use ripe_geofeed::server;
use ripe_geofeed::store::SnapshotStore;
use std::error::Error;
use std::sync::Arc;
use std::thread;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default()).expect("Error initializing log4rs");
    dotenv::dotenv().ok();
    //
    log::info!("#Start main()");

    let config = Config::from_env()?;
    let store = Arc::new(SnapshotStore::new());
    let generator = Arc::new(FeedGenerator::new(
        Box::new(RipeClient::new(&config.email)),
        config.networks.clone(),
        Arc::clone(&store),
    ));

    // Initial generation in the background so the feed comes up without
    // waiting a full refresh interval
    {
        let generator = Arc::clone(&generator);
        thread::spawn(move || generator.regenerate());
    }
    spawn_refresh_scheduler(
        Arc::clone(&generator),
        config.refresh_interval_min,
        config.refresh_interval_max,
    );

    server::run(&config, store, generator)
}
