//! Civil calendar arithmetic for birth-chart computation.
//!
//! This crate provides:
//! - Julian Day / Julian Day Number conversions (proleptic Gregorian)
//! - A `CivilDateTime` value type with validation and minute arithmetic
//! - Longitude-based mean solar time offsets
//!
//! Everything here is pure arithmetic over primitive calendar values.

pub mod civil_time;
pub mod error;
pub mod julian;
pub mod solar_time;

pub use civil_time::CivilDateTime;
pub use error::TimeError;
pub use julian::{
    J2000_JD, MINUTES_PER_DAY, SECONDS_PER_DAY, calendar_to_jd, day_of_year, days_in_month,
    is_leap_year, jdn_from_gregorian, jdn_to_gregorian,
};
pub use solar_time::{MINUTES_PER_DEGREE, longitude_offset_minutes, solar_time_correction_minutes};
