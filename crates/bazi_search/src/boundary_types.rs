//! Types for boundary-sensitivity analysis.

use bazi_base::SolarTerm;
use serde::{Deserialize, Serialize};

use crate::chart_types::Candidate;

/// Configuration for boundary-sensitivity checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoundaryConfig {
    /// Half-width in days of the window around a major term (default 3).
    pub window_days: f64,
    /// Confidence cap applied when a month or year check triggers (default 0.7).
    pub confidence_cap: f64,
    /// Minutes around a two-hour branch change that trigger the hour check (default 10).
    pub hour_window_minutes: f64,
    /// Hour confidence exactly at a branch change (default 0.5).
    pub hour_floor: f64,
    /// Placeholder hour used when the birth time is unknown (default 12).
    pub unknown_time_hour: u32,
    /// Hour-pillar confidence when the birth time is unknown (default 0.0).
    pub unknown_time_confidence: f64,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            window_days: 3.0,
            confidence_cap: 0.7,
            hour_window_minutes: 10.0,
            hour_floor: 0.5,
            unknown_time_hour: 12,
            unknown_time_confidence: 0.0,
        }
    }
}

impl BoundaryConfig {
    /// Validate the configuration.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if !self.window_days.is_finite() || self.window_days <= 0.0 {
            return Err("boundary.window_days must be positive");
        }
        if !(0.0..=1.0).contains(&self.confidence_cap) {
            return Err("boundary.confidence_cap must be in [0, 1]");
        }
        if !self.hour_window_minutes.is_finite()
            || self.hour_window_minutes <= 0.0
            || self.hour_window_minutes > 60.0
        {
            return Err("boundary.hour_window_minutes must be in (0, 60]");
        }
        if !(0.0..=1.0).contains(&self.hour_floor) {
            return Err("boundary.hour_floor must be in [0, 1]");
        }
        if self.unknown_time_hour > 23 {
            return Err("boundary.unknown_time_hour must be in 0..=23");
        }
        if !(0.0..=0.5).contains(&self.unknown_time_confidence) {
            return Err("boundary.unknown_time_confidence must be in [0, 0.5]");
        }
        Ok(())
    }
}

/// Which pillar assignment a boundary makes ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryKind {
    /// A two-hour branch change.
    Hour,
    /// A major solar term (month change).
    Month,
    /// Lichun (year change).
    Year,
}

/// Side of the boundary the instant lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundarySide {
    Before,
    After,
}

impl BoundarySide {
    pub fn of(jd_ut: f64, boundary_jd_ut: f64) -> Self {
        if jd_ut < boundary_jd_ut {
            Self::Before
        } else {
            Self::After
        }
    }
}

/// One triggered boundary check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryTrigger {
    pub kind: BoundaryKind,
    /// Solar term for month/year triggers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<SolarTerm>,
    /// Boundary instant as Julian Date (UT).
    pub boundary_jd_ut: f64,
    /// Signed minutes from the boundary to the instant (negative = before).
    pub distance_minutes: f64,
    pub side: BoundarySide,
    /// Confidence this check allows, in [0, 1].
    pub confidence: f64,
}

/// Outcome of a boundary-sensitivity check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryCheckResult {
    pub has_hour_boundary: bool,
    pub has_month_boundary: bool,
    pub has_year_boundary: bool,
    /// Minimum confidence over triggered checks; 1.0 when none triggered.
    pub confidence: f64,
    pub triggers: Vec<BoundaryTrigger>,
    /// Alternative charts read across the triggered boundaries, most likely
    /// first. A [`ChartReport`](crate::ChartReport) lists them at its top
    /// level instead and leaves this empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<Candidate>,
}

impl Default for BoundaryCheckResult {
    fn default() -> Self {
        Self {
            has_hour_boundary: false,
            has_month_boundary: false,
            has_year_boundary: false,
            confidence: 1.0,
            triggers: Vec::new(),
            candidates: Vec::new(),
        }
    }
}

impl BoundaryCheckResult {
    /// True when any check triggered.
    pub fn is_alert(&self) -> bool {
        self.has_hour_boundary || self.has_month_boundary || self.has_year_boundary
    }

    /// Record a trigger, lowering (never raising) the overall confidence.
    pub(crate) fn push(&mut self, trigger: BoundaryTrigger) {
        match trigger.kind {
            BoundaryKind::Hour => self.has_hour_boundary = true,
            BoundaryKind::Month => self.has_month_boundary = true,
            BoundaryKind::Year => self.has_year_boundary = true,
        }
        self.confidence = self.confidence.min(trigger.confidence);
        self.triggers.push(trigger);
    }

    /// Lowest confidence among triggers of `kind`, if any.
    pub fn confidence_for(&self, kind: BoundaryKind) -> Option<f64> {
        self.triggers
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.confidence)
            .reduce(f64::min)
    }
}
