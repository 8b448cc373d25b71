//! Error type for the request facade.

use bazi_search::ChartError;
use thiserror::Error;

/// Errors from request parsing, validation or chart computation.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum RequestError {
    /// The engine rejected the birth record or configuration.
    #[error(transparent)]
    Chart(#[from] ChartError),
    /// A request field failed validation.
    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
    /// The request or response could not be (de)serialized.
    #[error("json error: {0}")]
    Json(String),
    /// The global engine has not been initialized.
    #[error("engine not initialized; call init() first")]
    NotInitialized,
    /// `init()` was called more than once.
    #[error("engine already initialized")]
    AlreadyInitialized,
}

impl RequestError {
    pub(crate) fn field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}
