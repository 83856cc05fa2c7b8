//! Geofeed data model.

use super::Prefix;
use chrono::{DateTime, Utc};

/// One normalized registry record: a prefix and its registered country.
///
/// The country code is taken from the registry as-is and is not validated
/// against ISO 3166.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// The network prefix.
    pub prefix: Prefix,
    /// Registry-supplied country code.
    pub country: String,
}

/// One configured supernet's resolved state: its own country plus the
/// sub-allocations registered under a different country.
///
/// Every exception lies within `prefix` and carries a country different
/// from `country`; the order follows the registry query result.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    /// The supernet prefix.
    pub prefix: Prefix,
    /// The supernet's own country.
    pub country: String,
    /// Sub-allocations whose country differs from the supernet's.
    pub exceptions: Vec<Record>,
}

/// One fully-generated feed result.
///
/// Built from scratch on every regeneration and never mutated afterwards;
/// the snapshot store publishes it by atomic replacement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Wall-clock time the generation run completed (UTC). `None` only for
    /// the initial placeholder before the first run.
    pub generated: Option<DateTime<Utc>>,
    /// Resolved allocations in configured supernet order.
    pub allocations: Vec<Allocation>,
}

impl Snapshot {
    /// Whether this snapshot came from a successful generation run.
    ///
    /// The initial placeholder (no timestamp, no allocations) and an
    /// all-fail run (timestamp but no allocations) are both "not ready";
    /// the serving layer answers 503 for them.
    pub fn is_ready(&self) -> bool {
        self.generated.is_some() && !self.allocations.is_empty()
    }
}
