//! Error types for the extraction run.

use std::fmt;

use crate::db::DbError;

/// Errors produced while running the extractor.
///
/// `Connection` and `Ddl` abort a run before any symbol is processed;
/// `Fetch` and `Upsert` are per-symbol and only counted as failures.
#[derive(Debug)]
pub enum ExtractError {
    /// The store could not be opened.
    Connection(DbError),
    /// The destination table could not be created.
    Ddl(DbError),
    /// The provider returned nothing usable for a symbol. The cause is opaque.
    Fetch {
        symbol: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Writing a symbol's row failed.
    Upsert { symbol: String, source: DbError },
    /// An operation needing the store ran before `connect`.
    NotConnected,
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection(e) => write!(f, "Error connecting to database: {}", e),
            Self::Ddl(e) => write!(f, "Error creating table: {}", e),
            Self::Fetch { symbol, source } => {
                write!(f, "Error fetching data for {}: {}", symbol, source)
            }
            Self::Upsert { symbol, source } => {
                write!(f, "Error inserting data for {}: {}", symbol, source)
            }
            Self::NotConnected => write!(f, "Not connected to database"),
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Connection(e) | Self::Ddl(e) => Some(e),
            Self::Upsert { source, .. } => Some(source),
            Self::Fetch { source, .. } => Some(source.as_ref()),
            Self::NotConnected => None,
        }
    }
}

impl ExtractError {
    /// True for errors that stop the run before processing starts.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Ddl(_) | Self::NotConnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_symbol() {
        let err = ExtractError::Fetch {
            symbol: "BADSYM.NS".to_string(),
            source: "Quote not found".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("BADSYM.NS"));
        assert!(msg.contains("Quote not found"));
    }

    #[test]
    fn fatal_classification() {
        assert!(ExtractError::NotConnected.is_fatal());
        let fetch = ExtractError::Fetch {
            symbol: "X".to_string(),
            source: "boom".into(),
        };
        assert!(!fetch.is_fatal());
    }
}
