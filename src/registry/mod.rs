//! Registry lookup interface and raw record model.
//!
//! The pipeline only needs "given a network prefix, return zero or more
//! attribute-bearing objects"; everything transport-specific lives behind
//! the [`Registry`] trait so the resolver and assembler can run against
//! canned data in tests.
//!
//! - [`Registry`] - the lookup seam
//! - [`RipeClient`] - the RIPE REST implementation
//! - [`normalize`] - raw objects to [`Record`](crate::models::Record)s

mod normalize;
mod ripe;

pub use normalize::normalize;
pub use ripe::RipeClient;

use crate::error::FeedError;
use crate::models::Prefix;

/// Scope of a registry query.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum QueryScope {
    /// Narrow query: only the exact supernet's own record.
    Exact,
    /// Broad query: the supernet plus all more-specific sub-ranges.
    MoreSpecific,
}

/// One name/value attribute of a registry object.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// One raw registry object: an ordered list of attributes.
#[derive(Debug, Clone, Default)]
pub struct RawObject {
    pub attributes: Vec<Attribute>,
}

/// A registry lookup transport.
pub trait Registry {
    /// Look up the records registered for `supernet` at the given scope.
    ///
    /// An empty result set is not an error at this layer; the resolver
    /// decides whether it is acceptable.
    fn lookup(&self, supernet: Prefix, scope: QueryScope) -> Result<Vec<RawObject>, FeedError>;
}
