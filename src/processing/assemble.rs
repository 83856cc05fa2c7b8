//! Feed assembly across all configured supernets.

use super::resolver::resolve;
use crate::error::FeedError;
use crate::models::{Prefix, Snapshot};
use crate::registry::Registry;
use chrono::Utc;

/// Build a fresh [`Snapshot`] by resolving every configured network in
/// order.
///
/// A network string that does not parse as a CIDR, and a network whose
/// resolution fails, are both logged and skipped; no single supernet can
/// abort the run. The snapshot is stamped with the completion time, even
/// when every supernet failed.
pub fn assemble(networks: &[String], registry: &dyn Registry) -> Snapshot {
    let mut snapshot = Snapshot::default();

    for network in networks {
        let supernet = match parse_network(network) {
            Ok(prefix) => prefix,
            Err(e) => {
                log::warn!("skipping configured network: {e}");
                continue;
            }
        };

        match resolve(supernet, registry) {
            Ok(allocation) => {
                log::info!(
                    "resolved {supernet}: country {country}, {count} exceptions",
                    country = allocation.country,
                    count = allocation.exceptions.len(),
                );
                snapshot.allocations.push(allocation);
            }
            Err(e) => log::warn!("skipping {supernet}: {e}"),
        }
    }

    snapshot.generated = Some(Utc::now());
    snapshot
}

/// Parse one configured network string. Failure here is a configuration
/// error, not a registry data error.
fn parse_network(network: &str) -> Result<Prefix, FeedError> {
    network
        .parse()
        .map_err(|_| FeedError::InvalidConfig(network.to_string()))
}
