//! Input and output types for chart assembly.

use std::collections::BTreeMap;

use bazi_base::{
    BaziError, Element, FourPillars, LuckDirection, Pillar, PillarPosition, Polarity, Sex, Stem,
    TenGod, TenRelationship, element_counts, ten_god, ten_relationship_strengths, useful_elements,
};
use bazi_time::CivilDateTime;
use serde::Serialize;

use crate::boundary_types::{BoundaryCheckResult, BoundaryKind};
use crate::cards::AnswerCard;
use crate::solar_term_types::{TermModel, TermMonth};
use crate::timeline::Timeline;

/// Geographic coordinates in degrees (east and north positive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn validate(&self) -> Result<(), BaziError> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(BaziError::ContractViolation("latitude must be in [-90, 90]"));
        }
        if !self.lon.is_finite() || !(-180.0..=180.0).contains(&self.lon) {
            return Err(BaziError::ContractViolation("longitude must be in [-180, 180]"));
        }
        Ok(())
    }
}

/// Recorded clock time of birth, or explicitly unknown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BirthTime {
    Known { hour: u32, minute: u32, second: f64 },
    Unknown,
}

impl BirthTime {
    pub fn hm(hour: u32, minute: u32) -> Self {
        Self::Known {
            hour,
            minute,
            second: 0.0,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known { .. })
    }
}

/// A validated-upstream birth record.
#[derive(Debug, Clone, PartialEq)]
pub struct BirthInput {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub time: BirthTime,
    pub sex: Sex,
    /// Free-text place, carried for the caller; never interpreted.
    pub place: Option<String>,
    /// Birth coordinates for the mean solar time correction. Without an
    /// explicit `utc_offset_minutes` the correction is taken against the
    /// term zone, so a longitude more than 45° from that zone's meridian is
    /// rejected rather than shifting the clock by hours.
    pub geo: Option<GeoPoint>,
    /// Offset east of UTC of the recorded clock; defaults to the term zone.
    pub utc_offset_minutes: Option<i32>,
}

impl BirthInput {
    pub fn new(year: i32, month: u32, day: u32, time: BirthTime, sex: Sex) -> Self {
        Self {
            year,
            month,
            day,
            time,
            sex,
            place: None,
            geo: None,
            utc_offset_minutes: None,
        }
    }

    pub fn with_geo(mut self, geo: GeoPoint) -> Self {
        self.geo = Some(geo);
        self
    }

    pub fn with_place(mut self, place: impl Into<String>) -> Self {
        self.place = Some(place.into());
        self
    }

    pub fn with_utc_offset(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = Some(minutes);
        self
    }

    /// Recorded clock time, with `placeholder_hour` standing in for an unknown time.
    pub fn civil_time(&self, placeholder_hour: u32) -> CivilDateTime {
        match self.time {
            BirthTime::Known {
                hour,
                minute,
                second,
            } => CivilDateTime::new(self.year, self.month, self.day, hour, minute, second),
            BirthTime::Unknown => {
                CivilDateTime::new(self.year, self.month, self.day, placeholder_hour, 0, 0.0)
            }
        }
    }

    /// Check everything except the calendar fields, which
    /// [`CivilDateTime::validate`] covers.
    pub fn validate(&self) -> Result<(), BaziError> {
        if let Some(geo) = &self.geo {
            geo.validate()?;
        }
        if self.utc_offset_minutes.is_some_and(|off| off.abs() > 14 * 60) {
            return Err(BaziError::ContractViolation("utc offset must be within ±14 h"));
        }
        Ok(())
    }
}

/// Day-master summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayMaster {
    pub stem: Stem,
    pub element: Element,
    pub polarity: Polarity,
}

impl DayMaster {
    pub fn of(stem: Stem) -> Self {
        Self {
            stem,
            element: stem.element(),
            polarity: stem.polarity(),
        }
    }
}

/// Ten-way relationship of each visible stem to the day master.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StemGods {
    pub year: TenGod,
    pub month: TenGod,
    pub hour: TenGod,
}

/// Four pillars with their derived tallies.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub pillars: FourPillars,
    pub element_counts: BTreeMap<Element, u32>,
    pub ten_relationship_strengths: BTreeMap<TenRelationship, u32>,
    pub useful_elements: Vec<Element>,
}

impl Chart {
    pub fn from_pillars(pillars: FourPillars) -> Self {
        let element_counts = element_counts(&pillars);
        let useful_elements = useful_elements(&element_counts);
        Self {
            pillars,
            ten_relationship_strengths: ten_relationship_strengths(&pillars),
            element_counts,
            useful_elements,
        }
    }

    pub fn day_master(&self) -> DayMaster {
        DayMaster::of(self.pillars.day_master())
    }

    pub fn stem_gods(&self) -> StemGods {
        let dm = self.pillars.day_master();
        StemGods {
            year: ten_god(dm, self.pillars.year.stem),
            month: ten_god(dm, self.pillars.month.stem),
            hour: ten_god(dm, self.pillars.hour.stem),
        }
    }

    /// Category with the highest strength (first in category order on ties).
    pub fn dominant_relationship(&self) -> Option<TenRelationship> {
        self.ten_relationship_strengths
            .iter()
            .fold(None, |best: Option<(TenRelationship, u32)>, (r, n)| match best {
                Some((_, m)) if m >= *n => best,
                _ => Some((*r, *n)),
            })
            .map(|(r, _)| r)
    }
}

/// An alternative chart on the other side of an ambiguous boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(flatten)]
    pub chart: Chart,
    /// Boundary that produced this alternative.
    pub reason: BoundaryKind,
    /// Pillars that differ from the primary chart.
    pub changed: Vec<PillarPosition>,
    /// Relative plausibility in [0, 1]; closer boundaries rank higher.
    pub likelihood: f64,
    /// Minutes between the recorded instant and the boundary.
    pub distance_minutes: f64,
}

/// How the month pillar was resolved, and the solar-time adjustment applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub term_model: TermModel,
    pub utc_offset_minutes: i32,
    /// Minutes added to the recorded clock to get local mean solar time.
    pub solar_time_offset_minutes: f64,
    pub term_month: TermMonth,
    /// Month pillar from the civil month, ignoring solar terms.
    pub civil_month_pillar: Pillar,
    pub month_sources_agree: bool,
    pub luck_direction: LuckDirection,
}

/// Full assembled output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartReport {
    #[serde(flatten)]
    pub chart: Chart,
    pub day_master: DayMaster,
    pub stem_gods: StemGods,
    pub hour_known: bool,
    /// Corrected local time the day and hour pillars were read from.
    pub normalized_instant: CivilDateTime,
    pub boundary_alert: BoundaryCheckResult,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<Candidate>,
    pub timeline: Timeline,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub answer_cards: Vec<AnswerCard>,
    pub diagnostics: Diagnostics,
}

impl ChartReport {
    pub fn pillars(&self) -> &FourPillars {
        &self.chart.pillars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazi_base::{Branch, day_pillar, hour_pillar, month_pillar_for_term_month, year_pillar};

    fn chart() -> Chart {
        let year = year_pillar(1999);
        let day = day_pillar(2000, 1, 1);
        Chart::from_pillars(FourPillars {
            year,
            month: month_pillar_for_term_month(year.stem, 11),
            day,
            hour: hour_pillar(day.stem, 12),
        })
    }

    #[test]
    fn chart_tallies() {
        let c = chart();
        assert_eq!(c.pillars.day.branch, Branch::Wu);
        assert_eq!(c.useful_elements, vec![Element::Metal]);
        assert_eq!(c.dominant_relationship(), Some(TenRelationship::Peer));
        assert_eq!(c.day_master().element, Element::Earth);
    }

    #[test]
    fn stem_gods() {
        // Wu day master: Ji → RobWealth, Bing → IndirectResource, Wu → Friend
        let g = chart().stem_gods();
        assert_eq!(g.year, TenGod::RobWealth);
        assert_eq!(g.month, TenGod::IndirectResource);
        assert_eq!(g.hour, TenGod::Friend);
    }

    #[test]
    fn geo_validation() {
        assert!(GeoPoint::new(39.9, 116.4).validate().is_ok());
        assert!(GeoPoint::new(91.0, 0.0).validate().is_err());
        assert!(GeoPoint::new(0.0, f64::NAN).validate().is_err());
    }

    #[test]
    fn unknown_time_uses_placeholder() {
        let input = BirthInput::new(1990, 6, 15, BirthTime::Unknown, Sex::Male);
        let t = input.civil_time(12);
        assert_eq!((t.hour, t.minute), (12, 0));
        assert!(!input.time.is_known());
    }

    #[test]
    fn rejects_wild_offset() {
        let input =
            BirthInput::new(1990, 6, 15, BirthTime::hm(10, 30), Sex::Male).with_utc_offset(900);
        assert!(input.validate().is_err());
    }

    #[test]
    fn chart_serializes_camel_case() {
        let v = serde_json::to_value(chart()).unwrap();
        assert!(v.get("elementCounts").is_some());
        assert_eq!(v["elementCounts"]["metal"], 0);
        assert_eq!(v["tenRelationshipStrengths"]["peer"], 4);
        assert_eq!(v["usefulElements"][0], "metal");
        assert_eq!(v["pillars"]["day"]["name"], "Wu-Wu");
    }
}
