//! Error types for the BRRTS scraper.
//!
//! Every failure the pipeline can hit maps to one variant here. Errors never
//! escape `scrape_activity`; they are folded into the result record's `error`
//! field at the pipeline boundary.

use thiserror::Error;

/// Closed set of pipeline failures.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// No Browserless credential configured
    #[error("BROWSERLESS_API_KEY not set. Add it to environment variables.")]
    MissingToken,

    /// Transport-level failure other than a timeout
    #[error("Network error: {0}")]
    Network(String),

    /// The rendering request exceeded its deadline
    #[error("Request timed out")]
    Timeout,

    /// Rendering API answered with a non-200 status
    #[error("Browserless API error: {code}")]
    Status { code: u16, body: String },

    /// Upstream payload could not be interpreted
    #[error("HTML parsing error: {0}")]
    Parse(String),
}

impl ScrapeError {
    /// Split an rquest transport error into timeout vs. everything else.
    pub(crate) fn from_transport(err: rquest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Result type alias using ScrapeError.
pub type Result<T> = std::result::Result<T, ScrapeError>;
