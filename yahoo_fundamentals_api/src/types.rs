//! Wire types for the `quoteSummary` endpoint.
//!
//! Only the modules requested by [`crate::Client`] are modelled, and only the
//! fields that feed [`Fundamentals`]. Yahoo returns `{}` for numeric fields it
//! has no data for, so every value is optional.

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryEnvelope {
    pub quote_summary: QuoteSummary,
}

#[derive(Deserialize, Debug, Clone)]
pub struct QuoteSummary {
    #[serde(default)]
    pub result: Option<Vec<QuoteSummaryResult>>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApiError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryResult {
    #[serde(default)]
    pub price: Option<PriceModule>,
    #[serde(default)]
    pub summary_detail: Option<SummaryDetail>,
    #[serde(default)]
    pub asset_profile: Option<AssetProfile>,
    #[serde(default)]
    pub financial_data: Option<FinancialData>,
}

/// A Yahoo numeric field: `{"raw": 123, "fmt": "123"}` or `{}`.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct FormattedValue {
    #[serde(default)]
    pub raw: Option<f64>,
    #[serde(default)]
    pub fmt: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PriceModule {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub market_cap: Option<FormattedValue>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDetail {
    #[serde(default)]
    pub market_cap: Option<FormattedValue>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct AssetProfile {
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct FinancialData {
    #[serde(default)]
    pub total_revenue: Option<FormattedValue>,
    #[serde(default)]
    pub financial_currency: Option<String>,
}

/// The four attributes extracted for a company. Anything Yahoo did not
/// report is `None`.
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct Fundamentals {
    pub symbol: String,
    pub revenue: Option<i64>,
    pub market_cap: Option<i64>,
    pub industry: Option<String>,
    pub sector: Option<String>,
}

impl QuoteSummaryResult {
    /// `financialData.totalRevenue`.
    pub fn total_revenue(&self) -> Option<i64> {
        self.financial_data
            .as_ref()
            .and_then(|f| f.total_revenue.as_ref())
            .and_then(raw_to_i64)
    }

    /// `price.marketCap`, falling back to `summaryDetail.marketCap`.
    pub fn market_cap(&self) -> Option<i64> {
        self.price
            .as_ref()
            .and_then(|p| p.market_cap.as_ref())
            .and_then(raw_to_i64)
            .or_else(|| {
                self.summary_detail
                    .as_ref()
                    .and_then(|s| s.market_cap.as_ref())
                    .and_then(raw_to_i64)
            })
    }

    pub fn industry(&self) -> Option<String> {
        self.asset_profile
            .as_ref()
            .and_then(|a| non_empty(a.industry.as_deref()))
    }

    pub fn sector(&self) -> Option<String> {
        self.asset_profile
            .as_ref()
            .and_then(|a| non_empty(a.sector.as_deref()))
    }

    pub fn fundamentals(&self, symbol: &str) -> Fundamentals {
        Fundamentals {
            symbol: symbol.to_string(),
            revenue: self.total_revenue(),
            market_cap: self.market_cap(),
            industry: self.industry(),
            sector: self.sector(),
        }
    }
}

fn raw_to_i64(value: &FormattedValue) -> Option<i64> {
    value.raw.filter(|v| v.is_finite()).map(|v| v as i64)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
