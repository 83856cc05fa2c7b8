//! Allocation resolution for a single supernet.

use crate::error::FeedError;
use crate::models::{Allocation, Prefix};
use crate::registry::{normalize, QueryScope, Registry};

/// Resolve one configured supernet into an [`Allocation`].
///
/// Two registry queries: a narrow one for the supernet's own record (the
/// first record returned is taken as authoritative; zero records is
/// [`FeedError::EmptyResult`]) and a broad one for all sub-ranges
/// registered under it. A sub-range becomes an exception iff its country
/// differs from the supernet's own.
///
/// The broad query also returns the supernet itself; with a consistent
/// registry its country matches the narrow result and it is filtered out
/// like any other same-country record.
pub fn resolve(supernet: Prefix, registry: &dyn Registry) -> Result<Allocation, FeedError> {
    let own_records = normalize(&registry.lookup(supernet, QueryScope::Exact)?)?;
    let own = own_records
        .first()
        .ok_or(FeedError::EmptyResult(supernet))?;

    let mut allocation = Allocation {
        prefix: own.prefix,
        country: own.country.clone(),
        exceptions: Vec::new(),
    };

    let sub_records = normalize(&registry.lookup(supernet, QueryScope::MoreSpecific)?)?;
    for record in sub_records {
        if record.country != allocation.country {
            allocation.exceptions.push(record);
        }
    }

    Ok(allocation)
}
