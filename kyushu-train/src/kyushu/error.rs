//! Reservation site client error types.

use crate::domain::{InvalidStationKeyword, QueryError};

/// Errors that can occur when talking to the reservation site.
#[derive(Debug, thiserror::Error)]
pub enum KyushuError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Site returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Homepage carried no transaction token
    #[error("no transaction token on the homepage")]
    MissingToken,

    /// Site rendered an error page instead of results
    #[error("site error: {0}")]
    Site(String),

    /// Station search keyword was rejected before sending
    #[error(transparent)]
    Keyword(#[from] InvalidStationKeyword),

    /// Search query was rejected before sending
    #[error(transparent)]
    Query(#[from] QueryError),
}
