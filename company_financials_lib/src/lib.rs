//! Batch extraction of company financials into SQLite.
//!
//! Reads listed companies from a source table, asks a market-data provider
//! for revenue, market cap, industry and sector, and upserts the results
//! keyed by symbol.

pub mod company;
pub mod config;
pub mod db;
pub mod error;
pub mod extractor;
pub mod provider;

pub use yahoo_fundamentals_api;

pub use company::{CompanyFinancials, CompanySymbol};
pub use config::ExtractConfig;
pub use db::{Db, DbError, FinancialsFilter, FinancialsRow};
pub use error::ExtractError;
pub use extractor::{Extractor, RunSummary};
pub use provider::FinancialsProvider;
