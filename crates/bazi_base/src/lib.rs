//! Tables and pure arithmetic for four-pillar charts.
//!
//! This crate provides:
//! - The five elements with their generation and domination cycles
//! - 10 heavenly stems and 12 earthly branches, with hidden stems
//! - Pillars, the four-pillar set, and the 60-pair sexagenary cycle
//! - The 24 solar terms and their month numbering
//! - Year/month/day/hour pillar formulas
//! - Ten-relationship classification relative to the day master
//! - Luck-pillar direction, start age and sequence
//! - Element and relationship tallies over a chart
//!
//! Nothing here allocates state or performs I/O; every table is a `const`.

pub mod balance;
pub mod branch;
pub mod element;
pub mod error;
pub mod ganzhi;
pub mod luck;
pub mod pillar;
pub mod sexagenary;
pub mod solar_term;
pub mod stem;
pub mod ten_relationship;
pub mod util;

pub use balance::{element_counts, ten_relationship_strengths, useful_elements};
pub use branch::{ALL_BRANCHES, Branch, HiddenStem};
pub use element::{ALL_ELEMENTS, Element, generates};
pub use error::BaziError;
pub use ganzhi::{
    DAY_EPOCH_JDN, day_pillar, day_pillar_from_jdn, hour_branch, hour_pillar, month_pillar,
    month_pillar_for_term_month, year_pillar,
};
pub use luck::{
    LuckDirection, Sex, luck_direction, luck_pillar_sequence, luck_start_age_years,
};
pub use pillar::{FourPillars, Pillar, PillarPosition};
pub use sexagenary::{SEXAGENARY_EPOCH_YEAR, sexagenary_from_year};
pub use solar_term::{ALL_SOLAR_TERMS, SolarTerm, TermKind};
pub use stem::{ALL_STEMS, Polarity, Stem};
pub use ten_relationship::{
    ALL_TEN_RELATIONSHIPS, TenGod, TenRelationship, relationship_of_elements, ten_god,
    ten_relationship,
};
pub use util::{normalize_360, normalize_pm180};
