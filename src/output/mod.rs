//! Feed output formatting.

mod geofeed;

pub use geofeed::{format_http_date, render_geofeed};
