//! Run configuration sourced from the process environment.

use std::path::PathBuf;
use std::time::Duration;

/// Default database file name.
pub const DEFAULT_DATABASE: &str = "india_listed_companies.db";

/// Default pause between symbols.
pub const DEFAULT_DELAY_SECS: f64 = 1.0;

pub const ENV_DB_PATH: &str = "COMPANY_DB_PATH";
pub const ENV_DELAY_SECS: &str = "EXTRACT_DELAY_SECS";
pub const ENV_YAHOO_BASE_URL: &str = "YAHOO_BASE_URL";

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractConfig {
    /// SQLite database holding both the source and destination tables.
    pub db_path: PathBuf,
    /// Fixed pause after every symbol, success or failure.
    pub delay: Duration,
    /// Override for the Yahoo Finance base URL.
    pub yahoo_base_url: Option<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DATABASE),
            delay: Duration::from_secs_f64(DEFAULT_DELAY_SECS),
            yahoo_base_url: None,
        }
    }
}

impl ExtractConfig {
    /// Build from `COMPANY_DB_PATH`, `EXTRACT_DELAY_SECS` and `YAHOO_BASE_URL`,
    /// falling back to defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let db_path = lookup(ENV_DB_PATH)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);
        let delay = lookup(ENV_DELAY_SECS)
            .and_then(|v| parse_delay_secs(&v))
            .unwrap_or(defaults.delay);
        let yahoo_base_url = lookup(ENV_YAHOO_BASE_URL).filter(|v| !v.trim().is_empty());
        Self {
            db_path,
            delay,
            yahoo_base_url,
        }
    }
}

/// Parse a non-negative, finite number of seconds.
pub fn parse_delay_secs(value: &str) -> Option<Duration> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .and_then(|v| Duration::try_from_secs_f64(v).ok())
}
