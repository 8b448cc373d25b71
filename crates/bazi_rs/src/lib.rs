//! Request-facing facade for the bazi chart engine.
//!
//! Accepts the JSON birth record a request handler receives, validates it
//! field by field, and returns the assembled chart as a typed report or as
//! JSON text. Functions take an explicit [`BaziEngine`]; the `global`
//! module offers a process-wide engine for callers that want one.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use bazi_rs::*;
//!
//! init(EngineConfig::default()).expect("engine init");
//!
//! let request = BirthRequest::from_json(
//!     r#"{"date":"1990-06-15","time":"10:30","sexAtBirth":"female"}"#,
//! ).unwrap();
//! let report = chart(&request).unwrap();
//! println!("day master: {}", report.day_master.stem);
//! ```

pub mod convenience;
pub mod error;
pub mod global;
pub mod request;

pub use convenience::{boundary_check, chart, chart_json, chart_json_global, compute_chart};
pub use error::RequestError;
pub use global::{init, is_initialized};
pub use request::{BirthRequest, PlaceGeo};

// Re-export engine types so callers don't need to depend on bazi_search directly.
pub use bazi_search::{
    AnswerCard, AnswerCardSource, BaziEngine, BirthInput, BirthTime, BoundaryCheckResult,
    BoundaryKind, Candidate, CardTopic, Chart, ChartError, ChartReport, EngineConfig, GeoPoint,
    Timeline,
};

// Re-export the tables used in reports.
pub use bazi_base::{
    Branch, Element, FourPillars, Pillar, PillarPosition, Sex, SolarTerm, Stem, TenGod,
    TenRelationship,
};
pub use bazi_time::CivilDateTime;
