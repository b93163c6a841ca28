//! SQLite storage for company financials.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use serde::Serialize;

use crate::company::{CompanyFinancials, CompanySymbol};

/// Read-only table listing the companies to process.
pub const SOURCE_TABLE: &str = "india_listed_companies";
/// Table owned by this crate, one row per symbol.
pub const FINANCIALS_TABLE: &str = "india_listed_companies_information";

const FINANCIALS_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS india_listed_companies_information (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    symbol TEXT NOT NULL UNIQUE,
    revenue INTEGER,
    market_cap INTEGER,
    industry TEXT,
    sector TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_company_info_sector
    ON india_listed_companies_information(sector);
";

#[derive(thiserror::Error, Debug)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// A stored destination row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialsRow {
    pub id: i64,
    pub symbol: String,
    pub revenue: Option<i64>,
    pub market_cap: Option<i64>,
    pub industry: Option<String>,
    pub sector: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Filter for [`Db::query_financials`].
#[derive(Debug, Clone, Default)]
pub struct FinancialsFilter {
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub limit: Option<i64>,
}

pub struct Db {
    conn: Connection,
}

impl Db {
    /// Open an existing database. A missing file is an error, not a new database.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Self::configure(conn)
    }

    /// Open a database, creating the file if it does not exist.
    pub fn open_or_create(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        Self::configure(conn)
    }

    fn configure(conn: Connection) -> Result<Self, DbError> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    #[doc(hidden)]
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Create the destination table if it does not exist yet.
    pub fn ensure_table(&self) -> Result<(), DbError> {
        self.conn.execute_batch(FINANCIALS_SCHEMA)?;
        Ok(())
    }

    pub fn has_financials_table(&self) -> Result<bool, DbError> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![FINANCIALS_TABLE],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// All `(Symbol, Name)` pairs from the source table, in the order SQLite
    /// returns them.
    pub fn list_symbols(&self) -> Result<Vec<CompanySymbol>, DbError> {
        let sql = format!("SELECT Symbol, Name FROM {}", SOURCE_TABLE);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(CompanySymbol {
                symbol: row.get(0)?,
                name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            })
        })?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    /// Insert a row, or refresh the attributes of the existing row for the
    /// same symbol. `created_at` is only written on insert.
    pub fn upsert_financials(&self, financials: &CompanyFinancials) -> Result<(), DbError> {
        self.upsert_financials_at(financials, Utc::now())
    }

    pub fn upsert_financials_at(
        &self,
        financials: &CompanyFinancials,
        at: DateTime<Utc>,
    ) -> Result<(), DbError> {
        let ts = at.to_rfc3339_opts(SecondsFormat::Millis, true);
        self.conn.execute(
            "INSERT INTO india_listed_companies_information
                (symbol, revenue, market_cap, industry, sector, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
             ON CONFLICT(symbol) DO UPDATE SET
                revenue = excluded.revenue,
                market_cap = excluded.market_cap,
                industry = excluded.industry,
                sector = excluded.sector,
                updated_at = excluded.updated_at",
            params![
                financials.symbol,
                financials.revenue,
                financials.market_cap,
                financials.industry,
                financials.sector,
                ts,
            ],
        )?;
        Ok(())
    }

    pub fn get_financials(&self, symbol: &str) -> Result<Option<FinancialsRow>, DbError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, symbol, revenue, market_cap, industry, sector, created_at, updated_at
                 FROM india_listed_companies_information
                 WHERE symbol = ?1",
                params![symbol],
                map_financials_row,
            )
            .optional()?;
        Ok(row)
    }

    pub fn financials_count(&self) -> Result<i64, DbError> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM india_listed_companies_information",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Stored rows ordered by symbol, optionally narrowed by sector/industry.
    pub fn query_financials(&self, filter: &FinancialsFilter) -> Result<Vec<FinancialsRow>, DbError> {
        let mut sql = String::from(
            "SELECT id, symbol, revenue, market_cap, industry, sector, created_at, updated_at
             FROM india_listed_companies_information
             WHERE 1=1",
        );

        let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(ref sector) = filter.sector {
            params_vec.push(Box::new(sector.clone()));
            sql.push_str(&format!(" AND sector = ?{}", params_vec.len()));
        }
        if let Some(ref industry) = filter.industry {
            params_vec.push(Box::new(format!("%{}%", industry)));
            sql.push_str(&format!(" AND industry LIKE ?{}", params_vec.len()));
        }

        sql.push_str(" ORDER BY symbol ASC");

        if let Some(n) = filter.limit {
            sql.push_str(&format!(" LIMIT {}", n));
        }

        let param_refs: Vec<&dyn rusqlite::types::ToSql> =
            params_vec.iter().map(|p| p.as_ref()).collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(param_refs.as_slice(), map_financials_row)?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    /// Close the connection, surfacing any error SQLite reports on close.
    pub fn close(self) -> Result<(), DbError> {
        self.conn.close().map_err(|(_, e)| DbError::Sqlite(e))
    }
}

fn map_financials_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<FinancialsRow> {
    Ok(FinancialsRow {
        id: row.get(0)?,
        symbol: row.get(1)?,
        revenue: row.get(2)?,
        market_cap: row.get(3)?,
        industry: row.get(4)?,
        sector: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}
