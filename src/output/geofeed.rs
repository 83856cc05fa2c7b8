//! RFC 8805 geofeed text rendering.

use crate::models::Snapshot;
use chrono::{DateTime, SecondsFormat, Utc};

/// Render a snapshot as geofeed text.
///
/// One `prefix,country,,,` line per allocation, followed by one such line
/// per exception record, between a `# Generated <RFC3339>` comment and a
/// trailing `# EOF`. The region/city/postal columns are left empty; the
/// registry only models a country per record.
pub fn render_geofeed(snapshot: &Snapshot) -> String {
    let mut out = String::new();

    if let Some(generated) = snapshot.generated {
        out.push_str(&format!(
            "# Generated {}\n",
            generated.to_rfc3339_opts(SecondsFormat::AutoSi, true)
        ));
    }

    for allocation in &snapshot.allocations {
        out.push_str(&format!(
            "{},{},,,\n",
            allocation.prefix, allocation.country
        ));
        for exception in &allocation.exceptions {
            out.push_str(&format!("{},{},,,\n", exception.prefix, exception.country));
        }
    }

    out.push_str("# EOF\n");
    out
}

/// Format a generation timestamp for the `Last-Modified` header (RFC 1123).
pub fn format_http_date(generated: DateTime<Utc>) -> String {
    generated.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
