//! Domain records read from and written to the store.

use serde::Serialize;
use yahoo_fundamentals_api::Fundamentals;

/// A listed company as it appears in the source table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanySymbol {
    /// Exchange-qualified ticker, e.g. `TCS.NS`.
    pub symbol: String,
    pub name: String,
}

impl CompanySymbol {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}

/// Attributes fetched for one company. Fields the provider had no data for are `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CompanyFinancials {
    pub symbol: String,
    pub revenue: Option<i64>,
    pub market_cap: Option<i64>,
    pub industry: Option<String>,
    pub sector: Option<String>,
}

impl From<Fundamentals> for CompanyFinancials {
    fn from(f: Fundamentals) -> Self {
        Self {
            symbol: f.symbol,
            revenue: f.revenue,
            market_cap: f.market_cap,
            industry: f.industry,
            sector: f.sector,
        }
    }
}
