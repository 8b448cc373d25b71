//! Types for solar-term boundary computation.

use bazi_base::{SolarTerm, TermKind};
use bazi_time::CivilDateTime;
use serde::{Deserialize, Serialize};

/// How term instants are derived for a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermModel {
    /// Apparent solar longitude from a low-precision series, inverted by bisection.
    #[default]
    SolarLongitude,
    /// Jan 1 00:00 of the term zone plus `floor(longitude)` days.
    LinearDayOffset,
}

impl TermModel {
    pub const fn name(self) -> &'static str {
        match self {
            Self::SolarLongitude => "solar_longitude",
            Self::LinearDayOffset => "linear_day_offset",
        }
    }
}

/// Configuration for the solar-term calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolarTermConfig {
    pub model: TermModel,
    /// First supported year (inclusive).
    pub min_year: i32,
    /// Last supported year (inclusive).
    pub max_year: i32,
    /// Offset east of UTC, in minutes, of the zone term dates are reported in
    /// (and, for the linear model, counted from).
    pub utc_offset_minutes: i32,
    /// Days before the next major term over which month confidence degrades.
    pub confidence_window_days: f64,
    /// Month confidence exactly at a major term.
    pub confidence_floor: f64,
    /// Maximum bisection iterations (default 60).
    pub max_iterations: u32,
    /// Convergence threshold in days (default 1e-7, ~9 ms).
    pub convergence_days: f64,
}

impl Default for SolarTermConfig {
    fn default() -> Self {
        Self {
            model: TermModel::SolarLongitude,
            min_year: 1800,
            max_year: 2200,
            utc_offset_minutes: 480,
            confidence_window_days: 7.0,
            confidence_floor: 0.5,
            max_iterations: 60,
            convergence_days: 1e-7,
        }
    }
}

impl SolarTermConfig {
    /// Default window with the linear day-offset model.
    pub fn linear() -> Self {
        Self {
            model: TermModel::LinearDayOffset,
            ..Self::default()
        }
    }

    pub fn supports_year(&self, year: i32) -> bool {
        (self.min_year..=self.max_year).contains(&year)
    }

    /// Validate the configuration.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if self.min_year > self.max_year {
            return Err("solar_terms.min_year must not exceed max_year");
        }
        if self.utc_offset_minutes.abs() > 14 * 60 {
            return Err("solar_terms.utc_offset_minutes must be within ±14 h");
        }
        if !self.confidence_window_days.is_finite() || self.confidence_window_days <= 0.0 {
            return Err("solar_terms.confidence_window_days must be positive");
        }
        if !(0.0..=1.0).contains(&self.confidence_floor) {
            return Err("solar_terms.confidence_floor must be in [0, 1]");
        }
        if self.max_iterations == 0 {
            return Err("solar_terms.max_iterations must be > 0");
        }
        if !self.convergence_days.is_finite() || self.convergence_days <= 0.0 {
            return Err("solar_terms.convergence_days must be positive");
        }
        Ok(())
    }
}

/// One resolved solar term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarTermBoundary {
    pub term: SolarTerm,
    pub kind: TermKind,
    /// Target apparent solar longitude in degrees.
    pub longitude_deg: f64,
    /// Gregorian year whose table this boundary belongs to.
    pub year: i32,
    /// Term instant as Julian Date (UT).
    pub jd_ut: f64,
    /// Term instant on the clock of the term zone.
    pub local: CivilDateTime,
}

impl SolarTermBoundary {
    /// Chart month opened by this term, for major terms.
    pub fn month_number(&self) -> Option<u32> {
        self.term.month_number()
    }

    pub fn is_major(&self) -> bool {
        self.kind == TermKind::Major
    }
}

/// A year's 24 boundaries, ascending by instant.
pub type YearTerms = [SolarTermBoundary; 24];

/// The chart month containing an instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TermMonth {
    /// Chart year: the Gregorian year of the Lichun that opened it.
    pub term_year: i32,
    /// Chart month number (1 = opened by Lichun .. 12).
    pub month: u32,
    /// Major term that opened the month.
    pub started: SolarTermBoundary,
    /// Major term that closes the month.
    pub next: SolarTermBoundary,
    /// Month confidence in [0, 1].
    pub confidence: f64,
}

impl TermMonth {
    /// Days from `jd_ut` until the month closes.
    pub fn days_to_next(&self, jd_ut: f64) -> f64 {
        self.next.jd_ut - jd_ut
    }

    /// Days from the month opening until `jd_ut`.
    pub fn days_since_start(&self, jd_ut: f64) -> f64 {
        jd_ut - self.started.jd_ut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let c = SolarTermConfig::default();
        assert_eq!(c.model, TermModel::SolarLongitude);
        assert_eq!(c.utc_offset_minutes, 480);
        assert!(c.validate().is_ok());
        assert!(c.supports_year(1800));
        assert!(c.supports_year(2200));
        assert!(!c.supports_year(2201));
    }

    #[test]
    fn rejects_inverted_window() {
        let c = SolarTermConfig {
            min_year: 2000,
            max_year: 1999,
            ..SolarTermConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_bad_floor() {
        let c = SolarTermConfig {
            confidence_floor: 1.5,
            ..SolarTermConfig::default()
        };
        assert!(c.validate().is_err());
    }
}
