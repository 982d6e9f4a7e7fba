//! Error taxonomy for advisory queries.

use crate::models::AdvisoryType;
use thiserror::Error;

/// Failure of an advisory query. Every kind is surfaced to the caller as-is;
/// nothing here is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdvisoryError {
    /// Altitude bounds were malformed or produced no windows.
    #[error("Invalid level range: {0}")]
    InvalidRange(String),

    /// A query parameter other than the altitude bounds was malformed.
    #[error("Invalid query parameter: {0}")]
    InvalidQuery(String),

    /// Upstream could not be reached or answered with a non-success status.
    #[error("Failed to fetch {advisory} data: {reason}")]
    UpstreamUnavailable { advisory: AdvisoryType, reason: String },

    /// Upstream payload did not match the attribute/geometry schema.
    #[error("Invalid {advisory} data: {message}")]
    SchemaValidation { advisory: AdvisoryType, message: String },
}

impl AdvisoryError {
    /// Stable tag for logs; the HTTP surface only exposes the message.
    pub fn kind(&self) -> &'static str {
        match self {
            AdvisoryError::InvalidRange(_) => "invalid_range",
            AdvisoryError::InvalidQuery(_) => "invalid_query",
            AdvisoryError::UpstreamUnavailable { .. } => "upstream_unavailable",
            AdvisoryError::SchemaValidation { .. } => "schema_validation",
        }
    }
}

pub type Result<T> = std::result::Result<T, AdvisoryError>;
