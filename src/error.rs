//! Error taxonomy for feed generation.
//!
//! Every failure is local to one configured supernet: the assembler logs it
//! and continues with the rest of the run. Nothing in here is fatal to the
//! process.

use crate::models::Prefix;
use thiserror::Error;

/// Errors raised while resolving registry data into feed entries.
#[derive(Debug, Error)]
pub enum FeedError {
    /// A configured network string is not a parseable CIDR.
    #[error("invalid network in configuration: {0}")]
    InvalidConfig(String),

    /// The registry lookup failed (network error or non-success status).
    #[error("registry lookup failed: {0}")]
    Transport(String),

    /// A registry response could not be normalized into records.
    #[error("malformed registry record: {0}")]
    MalformedRecord(String),

    /// An exact-match query returned no records for the supernet.
    #[error("registry returned no records for {0}")]
    EmptyResult(Prefix),
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> FeedError {
        FeedError::Transport(err.to_string())
    }
}
