//! The market-data seam: anything that can turn a ticker into financials.

use std::future::Future;

use crate::company::CompanyFinancials;

/// Source of per-company financial attributes.
///
/// Implementations report any failure (network, unknown symbol, rate limit,
/// unexpected payload) as an error; callers do not distinguish between them.
pub trait FinancialsProvider {
    type Error: std::error::Error + Send + Sync + 'static;

    fn fetch(
        &self,
        symbol: &str,
    ) -> impl Future<Output = Result<CompanyFinancials, Self::Error>> + Send;
}

impl FinancialsProvider for yahoo_fundamentals_api::Client {
    type Error = yahoo_fundamentals_api::Error;

    async fn fetch(&self, symbol: &str) -> Result<CompanyFinancials, Self::Error> {
        let fundamentals = self.get_fundamentals(symbol).await?;
        Ok(fundamentals.into())
    }
}
