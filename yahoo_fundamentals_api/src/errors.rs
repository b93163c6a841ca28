//! Error types for the API client.

/// Errors that can occur when talking to Yahoo Finance.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unreadable body).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// Yahoo answered with HTTP 429.
    #[error("Rate limited by Yahoo Finance (HTTP 429)")]
    RateLimited,
    /// The crumb endpoint returned nothing usable.
    #[error("Could not obtain a session crumb")]
    MissingCrumb,
    /// The response carried Yahoo's own error envelope.
    #[error("Yahoo Finance error {code}: {description}")]
    Api { code: String, description: String },
    /// The envelope parsed but held no result for the symbol.
    #[error("No quote summary returned for {0}")]
    NotFound(String),
    /// The body was not the JSON shape we expect.
    #[error("Failed to parse response: {0}")]
    ParseFailed(String),
}
