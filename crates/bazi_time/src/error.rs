//! Error types for civil date/time handling.

use thiserror::Error;

/// Errors from calendar validation or date/time parsing.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// Year/month/day do not name a Gregorian calendar date.
    #[error("invalid date: {0}")]
    InvalidDate(&'static str),
    /// Hour/minute/second outside a civil day.
    #[error("invalid time: {0}")]
    InvalidTime(&'static str),
    /// Text could not be parsed as a date/time.
    #[error("parse error: {0}")]
    Parse(String),
}
