//! The `extract` subcommand: fetch financials for every listed company.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::Args;
use company_financials_lib::config::parse_delay_secs;
use company_financials_lib::yahoo_fundamentals_api::Client;
use company_financials_lib::{ExtractConfig, Extractor};

/// Arguments for the `extract` subcommand. Unset flags fall back to the
/// environment (`COMPANY_DB_PATH`, `EXTRACT_DELAY_SECS`).
#[derive(Args)]
pub struct ExtractArgs {
    /// SQLite database path holding the source and destination tables
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Seconds to pause after each company
    #[arg(long)]
    pub delay_secs: Option<String>,
}

fn resolve_config(args: &ExtractArgs, mut config: ExtractConfig) -> Result<ExtractConfig> {
    if let Some(ref db) = args.db {
        config.db_path = db.clone();
    }
    if let Some(ref raw) = args.delay_secs {
        config.delay = match parse_delay_secs(raw) {
            Some(delay) => delay,
            None => bail!("--delay-secs must be a non-negative number, got '{}'", raw),
        };
    }
    Ok(config)
}

pub async fn run(args: &ExtractArgs) -> Result<()> {
    let config = resolve_config(args, ExtractConfig::from_env())?;

    let client = match config.yahoo_base_url.as_deref() {
        Some(url) => Client::with_base_url(url),
        None => Client::new(),
    }
    .map_err(|e| anyhow!("Failed to create Yahoo client: {}", e))?;

    eprintln!(
        "Extracting into {} ({:.1}s between companies)",
        config.db_path.display(),
        config.delay.as_secs_f64()
    );

    let mut extractor = Extractor::new(&config.db_path, client);
    match extractor.run(config.delay).await {
        Ok(summary) => println!("\n{}", summary),
        // Already logged by the extractor; the run simply ends.
        Err(e) => eprintln!("Extraction aborted: {}", e),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn args(db: Option<&str>, delay: Option<&str>) -> ExtractArgs {
        ExtractArgs {
            db: db.map(PathBuf::from),
            delay_secs: delay.map(str::to_string),
        }
    }

    #[test]
    fn flags_override_config() {
        let config = resolve_config(&args(Some("/tmp/x.db"), Some("0.25")), ExtractConfig::default())
            .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/x.db"));
        assert_eq!(config.delay, Duration::from_millis(250));
    }

    #[test]
    fn no_flags_keep_config() {
        let config = resolve_config(&args(None, None), ExtractConfig::default()).unwrap();
        assert_eq!(config, ExtractConfig::default());
    }

    #[test]
    fn invalid_delay_is_rejected() {
        assert!(resolve_config(&args(None, Some("-3")), ExtractConfig::default()).is_err());
    }

    #[test]
    fn overflowing_delay_is_rejected() {
        assert!(resolve_config(&args(None, Some("1e300")), ExtractConfig::default()).is_err());
    }
}
