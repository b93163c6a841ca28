//! Minimal Yahoo Finance client for per-company fundamentals.
//!
//! Wraps the `quoteSummary` endpoint (with the cookie/crumb session handshake)
//! and flattens the handful of attributes callers care about into
//! [`types::Fundamentals`].

mod client;
mod errors;
pub mod types;

pub use self::client::Client;
pub use self::errors::Error;
pub use self::types::Fundamentals;
