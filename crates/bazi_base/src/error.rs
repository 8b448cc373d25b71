//! Error types for chart arithmetic.

use thiserror::Error;

/// Errors raised by pillar and solar-term arithmetic.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum BaziError {
    /// The caller passed a value that upstream validation should have rejected.
    #[error("contract violation: {0}")]
    ContractViolation(&'static str),
    /// The instant needs solar-term boundaries of a year outside the supported window.
    #[error("no solar-term boundary available for year {year}")]
    UnresolvedBoundary { year: i32 },
}
