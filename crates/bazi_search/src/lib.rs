//! Four-pillar chart derivation engine.
//!
//! This crate provides:
//! - Solar-term boundaries per year, with an injected per-year cache
//! - Chart-month lookup with boundary-proximity confidence
//! - Boundary-sensitivity checks (hour, month, year) and alternative charts
//! - Chart assembly: pillars, element and ten-relationship tallies,
//!   luck/annual/monthly timeline, templated answer cards
//!
//! All computation is synchronous arithmetic; nothing here performs I/O.

pub mod boundary;
pub mod boundary_types;
pub mod cards;
pub mod chart_types;
pub mod config;
pub mod engine;
pub mod error;
pub(crate) mod search_util;
pub mod solar_term;
pub mod solar_term_types;
pub mod timeline;

pub use boundary::{BoundaryAnalyzer, hour_boundary_distances};
pub use boundary_types::{
    BoundaryCheckResult, BoundaryConfig, BoundaryKind, BoundarySide, BoundaryTrigger,
};
pub use cards::{AnswerCard, AnswerCardSource, CardTopic, TemplateCards};
pub use chart_types::{
    BirthInput, BirthTime, Candidate, Chart, ChartReport, DayMaster, Diagnostics, GeoPoint,
    StemGods,
};
pub use config::EngineConfig;
pub use engine::{BaziEngine, ResolvedInstant};
pub use error::ChartError;
pub use solar_term::{SolarTermCalculator, apparent_solar_longitude, term_confidence};
pub use solar_term_types::{SolarTermBoundary, SolarTermConfig, TermModel, TermMonth, YearTerms};
pub use timeline::{
    AnnualPillar, LuckPillar, MonthlyPillar, Timeline, TimelineConfig, TimelineInput,
    build_timeline,
};
