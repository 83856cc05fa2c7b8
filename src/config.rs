//! Environment-driven configuration.
//!
//! All options come from environment variables (with `.env` support via
//! dotenv in `main`):
//! - `LISTEN_ADDRESS` - bind address, default `0.0.0.0:8080`
//! - `REFRESH_INTERVAL_MIN` / `REFRESH_INTERVAL_MAX` - refresh window in
//!   hours, defaults 24 and 36
//! - `NETWORKS` - required comma-separated list of supernet CIDRs
//! - `EMAIL` - required operator contact, sent in the registry User-Agent
//! - `KEY` - optional shared secret for the /generate endpoint

use std::env;
use std::error::Error;

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Network address the HTTP server binds to.
    pub listen_address: String,
    /// Minimum hours between refresh runs.
    pub refresh_interval_min: u64,
    /// Maximum hours between refresh runs.
    pub refresh_interval_max: u64,
    /// Supernet CIDR strings, in feed order.
    pub networks: Vec<String>,
    /// Operator contact e-mail for outbound request identification.
    pub email: String,
    /// Shared secret for triggering regeneration; `None` disables the
    /// endpoint.
    pub key: Option<String>,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// # Returns
    /// * `Ok(Config)` - Validated configuration
    /// * `Err` - If a required variable is missing or a value is invalid
    pub fn from_env() -> Result<Config, Box<dyn Error>> {
        let listen_address =
            env::var("LISTEN_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let refresh_interval_min = hours_var("REFRESH_INTERVAL_MIN", 24)?;
        let refresh_interval_max = hours_var("REFRESH_INTERVAL_MAX", 36)?;
        if refresh_interval_min > refresh_interval_max {
            return Err(format!(
                "REFRESH_INTERVAL_MIN ({refresh_interval_min}) exceeds REFRESH_INTERVAL_MAX ({refresh_interval_max})"
            )
            .into());
        }

        let networks = parse_networks(
            &env::var("NETWORKS").map_err(|_| "NETWORKS environment variable not set")?,
        );
        if networks.is_empty() {
            return Err("NETWORKS contains no networks".into());
        }

        // Required so the database operator can contact the feed operator
        let email = env::var("EMAIL").map_err(|_| "EMAIL environment variable not set")?;

        let key = env::var("KEY").ok().filter(|key| !key.is_empty());

        Ok(Config {
            listen_address,
            refresh_interval_min,
            refresh_interval_max,
            networks,
            email,
            key,
        })
    }
}

fn hours_var(name: &str, default: u64) -> Result<u64, Box<dyn Error>> {
    match env::var(name) {
        Ok(value) => parse_hours(name, &value),
        Err(_) => Ok(default),
    }
}

/// Parse an interval value as a whole number of hours, tolerating the
/// surrounding whitespace .env files tend to pick up.
fn parse_hours(name: &str, value: &str) -> Result<u64, Box<dyn Error>> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("{name} is not a whole number of hours: {value}").into())
}

/// Split a comma-separated list of networks, dropping empty entries and
/// surrounding whitespace but preserving order.
pub fn parse_networks(networks: &str) -> Vec<String> {
    networks
        .split(',')
        .map(|network| network.trim().to_string())
        .filter(|network| !network.is_empty())
        .collect()
}
