//! The batch run: read symbols, fetch each one, upsert, pause, report.
//!
//! Processing is strictly sequential. A fixed pause follows every symbol,
//! whatever its outcome, to stay under the provider's implicit rate limit.
//! Per-symbol failures are logged and counted; only a failure to open the
//! store or create the destination table stops the run.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tokio::time::sleep;

use crate::company::{CompanyFinancials, CompanySymbol};
use crate::db::Db;
use crate::error::ExtractError;
use crate::provider::FinancialsProvider;

/// Totals for one run. `successful + failed == total` once the run completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(50);
        writeln!(f, "{}", rule)?;
        writeln!(f, "Processing complete!")?;
        writeln!(f, "Total companies: {}", self.total)?;
        writeln!(f, "Successful: {}", self.successful)?;
        writeln!(f, "Failed: {}", self.failed)?;
        write!(f, "{}", rule)
    }
}

/// Owns the store connection for the duration of a run and the provider
/// used to fetch attributes.
pub struct Extractor<P> {
    db_path: PathBuf,
    provider: P,
    db: Option<Db>,
}

impl<P: FinancialsProvider> Extractor<P> {
    pub fn new(db_path: impl Into<PathBuf>, provider: P) -> Self {
        Self {
            db_path: db_path.into(),
            provider,
            db: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.db.is_some()
    }

    pub fn connect(&mut self) -> Result<(), ExtractError> {
        match Db::open(&self.db_path) {
            Ok(db) => {
                tracing::info!("Successfully connected to database {}", self.db_path.display());
                self.db = Some(db);
                Ok(())
            }
            Err(e) => {
                let err = ExtractError::Connection(e);
                tracing::error!("{}", err);
                Err(err)
            }
        }
    }

    fn db(&self) -> Result<&Db, ExtractError> {
        self.db.as_ref().ok_or(ExtractError::NotConnected)
    }

    /// Create the destination table if missing. A no-op when it already exists.
    pub fn ensure_table(&self) -> Result<(), ExtractError> {
        let result = self
            .db()
            .and_then(|db| db.ensure_table().map_err(ExtractError::Ddl));
        match result {
            Ok(()) => {
                tracing::info!("Table '{}' is ready", crate::db::FINANCIALS_TABLE);
                Ok(())
            }
            Err(err) => {
                tracing::error!("{}", err);
                Err(err)
            }
        }
    }

    /// All source symbols. Empty when not connected or when the query fails.
    pub fn list_symbols(&self) -> Vec<CompanySymbol> {
        let db = match self.db() {
            Ok(db) => db,
            Err(err) => {
                tracing::error!("{}", err);
                return Vec::new();
            }
        };
        match db.list_symbols() {
            Ok(symbols) => {
                tracing::info!("Fetched {} company symbols", symbols.len());
                symbols
            }
            Err(e) => {
                tracing::error!("Error fetching symbols: {}", e);
                Vec::new()
            }
        }
    }

    /// Ask the provider for one symbol. The symbol is used exactly as stored.
    pub async fn fetch(&self, symbol: &str) -> Result<CompanyFinancials, ExtractError> {
        match self.provider.fetch(symbol).await {
            Ok(mut financials) => {
                financials.symbol = symbol.to_string();
                Ok(financials)
            }
            Err(e) => {
                let err = ExtractError::Fetch {
                    symbol: symbol.to_string(),
                    source: Box::new(e),
                };
                tracing::warn!("{}", err);
                Err(err)
            }
        }
    }

    pub fn upsert(&self, financials: &CompanyFinancials) -> Result<(), ExtractError> {
        let result = self.db().and_then(|db| {
            db.upsert_financials(financials)
                .map_err(|source| ExtractError::Upsert {
                    symbol: financials.symbol.clone(),
                    source,
                })
        });
        if let Err(ref err) = result {
            tracing::warn!("{}", err);
        }
        result
    }

    /// Release the connection. Safe to call when already closed.
    pub fn close(&mut self) {
        if let Some(db) = self.db.take() {
            match db.close() {
                Ok(()) => tracing::info!("Database connection closed"),
                Err(e) => tracing::warn!("Error closing database: {}", e),
            }
        }
    }

    /// Run the whole batch.
    ///
    /// Returns `Err` only when the store cannot be opened or the destination
    /// table cannot be created; in that case no symbol is processed.
    pub async fn run(&mut self, delay: Duration) -> Result<RunSummary, ExtractError> {
        self.connect()?;
        if let Err(err) = self.ensure_table() {
            self.close();
            return Err(err);
        }

        let companies = self.list_symbols();
        let mut summary = RunSummary {
            total: companies.len(),
            ..Default::default()
        };

        tracing::info!("Starting to process {} companies...", summary.total);

        for (idx, company) in companies.iter().enumerate() {
            tracing::info!(
                "Processing {}/{}: {} ({})",
                idx + 1,
                summary.total,
                company.name,
                company.symbol
            );

            let outcome = self
                .fetch(&company.symbol)
                .await
                .and_then(|financials| self.upsert(&financials));

            match outcome {
                Ok(()) => {
                    summary.successful += 1;
                    tracing::info!("Successfully inserted data for {}", company.symbol);
                }
                Err(_) => summary.failed += 1,
            }

            sleep(delay).await;
        }

        tracing::info!(
            "Processing complete: {} total, {} successful, {} failed",
            summary.total,
            summary.successful,
            summary.failed
        );
        self.close();
        Ok(summary)
    }
}
