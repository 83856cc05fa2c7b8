//! Self-updating RFC 8805 geofeed served from RIPE database allocations.
//!
//! The pipeline queries the registry for each configured supernet,
//! reduces raw address ranges to CIDR prefixes, keeps the sub-allocations
//! whose country differs from their parent block, and publishes the
//! result as an immutable snapshot behind an HTTP feed.

pub mod config;
pub mod error;
pub mod generator;
pub mod models;
pub mod output;
pub mod processing;
pub mod registry;
pub mod server;
pub mod store;

pub use error::FeedError;
