//! Domain models for the geofeed.
//!
//! This module contains the core data structures used throughout the
//! application:
//! - [`Prefix`] - IPv4/IPv6 network in CIDR form
//! - [`Record`] - one normalized registry record
//! - [`Allocation`] - a supernet with its country exceptions
//! - [`Snapshot`] - one immutable generated feed

mod feed;
mod prefix;

// Re-export public types
pub use feed::{Allocation, Record, Snapshot};
pub use prefix::{reduce_ipv4_range, Prefix, MAX_LENGTH_V4, MAX_LENGTH_V6};
