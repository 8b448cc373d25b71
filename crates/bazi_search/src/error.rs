//! Error types for chart assembly.

use bazi_base::BaziError;
use bazi_time::TimeError;
use thiserror::Error;

/// Errors from solar-term lookup, boundary analysis or chart assembly.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ChartError {
    /// Invalid birth record or out-of-window solar-term lookup.
    #[error(transparent)]
    Bazi(#[from] BaziError),
    /// Invalid calendar date or time of day.
    #[error(transparent)]
    Time(#[from] TimeError),
    /// Engine configuration failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// Engine configuration text could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(String),
}
