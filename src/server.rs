//! HTTP serving layer.
//!
//! Two routes: `/generate` triggers an authenticated regeneration, every
//! other path serves the current feed. Requests are handled on a small
//! thread pool so feed reads never wait behind a synchronous regeneration.

use crate::config::Config;
use crate::generator::FeedGenerator;
use crate::output::{format_http_date, render_geofeed};
use crate::store::SnapshotStore;
use std::error::Error;
use std::sync::Arc;
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Header carrying the regeneration secret.
const KEY_HEADER: &str = "x-geofeed-key";

/// Bind the server and run the request loop. Blocks until the listener
/// shuts down.
pub fn run(
    config: &Config,
    store: Arc<SnapshotStore>,
    generator: Arc<FeedGenerator>,
) -> Result<(), Box<dyn Error>> {
    let server = Server::http(&config.listen_address)
        .map_err(|e| format!("failed to bind {}: {e}", config.listen_address))?;
    let pool = rayon::ThreadPoolBuilder::new().num_threads(4).build()?;
    let key = config.key.clone();

    log::info!("Serving geofeed on {}", config.listen_address);

    for request in server.incoming_requests() {
        let store = Arc::clone(&store);
        let generator = Arc::clone(&generator);
        let key = key.clone();
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &store, &generator, key.as_deref()) {
                log::warn!("request error: {e}");
            }
        });
    }

    Ok(())
}

fn handle_request(
    request: Request,
    store: &SnapshotStore,
    generator: &FeedGenerator,
    key: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    log::debug!("{} {}", request.method(), request.url());

    match route_path(request.url()) {
        "/generate" => handle_regenerate(request, generator, key),
        _ => handle_feed(request, store),
    }
}

/// The path component of a request URL, without any query string.
fn route_path(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

/// Serve the current feed, or 503 before the first successful generation.
fn handle_feed(request: Request, store: &SnapshotStore) -> Result<(), Box<dyn Error>> {
    let snapshot = store.current();
    if !snapshot.is_ready() {
        return respond_status(request, 503);
    }

    let mut response = Response::from_string(render_geofeed(&snapshot))
        .with_header(make_header("Content-Type", "text/plain; charset=utf-8"));
    if let Some(generated) = snapshot.generated {
        response = response.with_header(make_header("Last-Modified", &format_http_date(generated)));
    }

    request.respond(response)?;
    Ok(())
}

/// Trigger a regeneration for a request carrying the configured key.
///
/// Without a configured key the endpoint is disabled (403 for everyone).
/// The run is synchronous: 200 means the store has been updated.
fn handle_regenerate(
    request: Request,
    generator: &FeedGenerator,
    key: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let Some(key) = key else {
        return respond_status(request, 403);
    };

    let supplied = request
        .headers()
        .iter()
        .find(|h| h.field.as_str().as_str().eq_ignore_ascii_case(KEY_HEADER))
        .map(|h| h.value.to_string());
    if supplied.as_deref() != Some(key) {
        return respond_status(request, 403);
    }

    generator.regenerate();
    respond_status(request, 200)
}

fn respond_status(request: Request, status: u16) -> Result<(), Box<dyn Error>> {
    request.respond(Response::empty(StatusCode(status)))?;
    Ok(())
}

fn make_header(key: &str, value: &str) -> Header {
    Header::from_bytes(key, value).expect("valid header")
}
