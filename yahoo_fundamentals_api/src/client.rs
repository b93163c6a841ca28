//! HTTP client for the Yahoo Finance `quoteSummary` API.

use std::sync::Mutex;
use std::time::Duration;

use url::Url;

use crate::{
    types::{Fundamentals, QuoteSummaryEnvelope, QuoteSummaryResult},
    Error,
};

/// Modules requested from `quoteSummary`; together they cover revenue,
/// market cap, industry and sector.
const MODULES: &str = "price,summaryDetail,assetProfile,financialData";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Yahoo rejects requests without a browser-ish user agent.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// HTTP client for Yahoo Finance fundamentals.
///
/// Holds a single `reqwest::Client` with a cookie store so the session cookie
/// from the priming request is replayed on the crumb and data requests. The
/// crumb is fetched lazily and cached until Yahoo answers 401.
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the API. Defaults to `https://query2.finance.yahoo.com`.
    base_api_url: String,
    /// URL hit once to obtain the session cookie.
    cookie_url: String,
    crumb: Mutex<Option<String>>,
}

impl Client {
    /// Creates a new client pointing at production Yahoo Finance.
    pub fn new() -> Result<Self, Error> {
        Self::build("https://query2.finance.yahoo.com", "https://fc.yahoo.com")
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        let base = base_url.trim_end_matches('/');
        Self::build(base, &format!("{}/consent", base))
    }

    fn build(base_api_url: &str, cookie_url: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self {
            http,
            base_api_url: base_api_url.to_string(),
            cookie_url: cookie_url.to_string(),
            crumb: Mutex::new(None),
        })
    }

    fn cached_crumb(&self) -> Option<String> {
        self.crumb.lock().ok().and_then(|guard| guard.clone())
    }

    fn store_crumb(&self, crumb: Option<String>) {
        if let Ok(mut guard) = self.crumb.lock() {
            *guard = crumb;
        }
    }

    async fn crumb(&self) -> Result<String, Error> {
        if let Some(crumb) = self.cached_crumb() {
            return Ok(crumb);
        }

        // Only the Set-Cookie header matters here; fc.yahoo.com itself answers 404.
        if let Err(e) = self.http.get(&self.cookie_url).send().await {
            tracing::debug!("Cookie priming request failed: {}", e);
        }

        let url = format!("{}/v1/test/getcrumb", self.base_api_url);
        let resp = self.http.get(url).send().await.map_err(|e| {
            tracing::error!("Failed to request crumb: {}", e);
            Error::RequestFailed
        })?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read crumb body: {}", e);
            Error::RequestFailed
        })?;

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited);
        }
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let crumb = body.trim();
        if crumb.is_empty() || crumb.contains('<') || crumb.contains(' ') {
            return Err(Error::MissingCrumb);
        }

        self.store_crumb(Some(crumb.to_string()));
        Ok(crumb.to_string())
    }

    fn quote_summary_url(&self, symbol: &str, crumb: &str) -> Result<Url, Error> {
        let mut url = Url::parse(&format!("{}/v10/finance/quoteSummary/", self.base_api_url))
            .map_err(|e| {
                tracing::error!("Invalid URL constructed: {}", e);
                Error::RequestFailed
            })?;
        url.path_segments_mut()
            .map_err(|_| Error::RequestFailed)?
            .pop_if_empty()
            .push(symbol);
        url.query_pairs_mut()
            .append_pair("modules", MODULES)
            .append_pair("crumb", crumb);
        Ok(url)
    }

    /// Fetches the raw `quoteSummary` result for one exchange-qualified ticker.
    ///
    /// The symbol is sent exactly as given.
    pub async fn get_quote_summary(&self, symbol: &str) -> Result<QuoteSummaryResult, Error> {
        let crumb = self.crumb().await?;
        let url = self.quote_summary_url(symbol, &crumb)?;

        let resp = self.http.get(url).send().await.map_err(|e| {
            tracing::error!("Failed to get quote summary for {}: {}", symbol, e);
            Error::RequestFailed
        })?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.store_crumb(None);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited);
        }

        // Yahoo reports unknown symbols as a 404 carrying its own error envelope.
        let parsed = serde_json::from_str::<QuoteSummaryEnvelope>(&body);
        if let Ok(QuoteSummaryEnvelope { quote_summary }) = &parsed {
            if let Some(err) = &quote_summary.error {
                return Err(Error::Api {
                    code: err.code.clone(),
                    description: err.description.clone(),
                });
            }
        }

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let envelope = parsed.map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse quote summary: {} | body: {}", e, snippet);
            Error::ParseFailed(e.to_string())
        })?;

        envelope
            .quote_summary
            .result
            .into_iter()
            .flatten()
            .next()
            .ok_or_else(|| Error::NotFound(symbol.to_string()))
    }

    /// Fetches revenue, market cap, industry and sector for one ticker.
    pub async fn get_fundamentals(&self, symbol: &str) -> Result<Fundamentals, Error> {
        Ok(self.get_quote_summary(symbol).await?.fundamentals(symbol))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
