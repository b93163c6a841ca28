//! The `show` subcommand: print stored financials.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::Args;
use company_financials_lib::{Db, ExtractConfig, FinancialsFilter, FinancialsRow};

use crate::output::{print_financials_csv, print_financials_markdown, print_financials_table, print_json, OutputFormat};

#[derive(Args)]
pub struct ShowArgs {
    /// SQLite database path (defaults to COMPANY_DB_PATH or india_listed_companies.db)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Only companies in this sector (exact match)
    #[arg(long)]
    pub sector: Option<String>,

    /// Only companies whose industry contains this text
    #[arg(long)]
    pub industry: Option<String>,

    /// Maximum rows to print
    #[arg(long)]
    pub limit: Option<i64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

/// Stored rows matching the filter. A database that has never been extracted
/// into has no destination table and yields no rows; nothing is created.
fn load_rows(db_path: &Path, filter: &FinancialsFilter) -> Result<Vec<FinancialsRow>> {
    let db = Db::open(db_path)?;
    let rows = if db.has_financials_table()? {
        db.query_financials(filter)?
    } else {
        Vec::new()
    };
    db.close()?;
    Ok(rows)
}

pub fn run(args: &ShowArgs) -> Result<()> {
    if let Some(n) = args.limit {
        if n < 1 {
            bail!("--limit must be at least 1");
        }
    }

    let db_path = args
        .db
        .clone()
        .unwrap_or_else(|| ExtractConfig::from_env().db_path);

    let rows = load_rows(
        &db_path,
        &FinancialsFilter {
            sector: args.sector.clone(),
            industry: args.industry.clone(),
            limit: args.limit,
        },
    )?;
    eprintln!("{} companies", rows.len());

    match args.output {
        OutputFormat::Table => print_financials_table(&rows),
        OutputFormat::Markdown => print_financials_markdown(&rows),
        OutputFormat::Csv => print_financials_csv(&rows)?,
        OutputFormat::Json => print_json(&rows),
    }

    Ok(())
}
