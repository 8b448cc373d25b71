//! Solar-term boundaries with a per-year cache.
//!
//! The calculator resolves the 24 term instants of a Gregorian year once and
//! shares them through an `Arc`. The cache is owned by the calculator, not a
//! global, so tests and engines each get their own.
//!
//! The default [`TermModel::SolarLongitude`] evaluates the low-accuracy solar
//! series of Meeus (Astronomical Algorithms, ch. 25): geometric mean longitude
//! and equation of centre, corrected for aberration and the main nutation
//! term. The series is good to about 0.01°, and the Sun moves about 1° per
//! day, so term instants land within 15 minutes of a full ephemeris for
//! 1800-2200 (UT is used in place of TT; ΔT adds at most a couple of
//! minutes in that range). Each term is bracketed ±5 days around a
//! mean-motion estimate and bisected.
//!
//! [`TermModel::LinearDayOffset`] is the coarse form: Jan 1 00:00 of the
//! term zone plus `floor(longitude)` days.

use std::sync::Arc;

use bazi_base::{ALL_SOLAR_TERMS, BaziError, SolarTerm, normalize_360, normalize_pm180};
use bazi_time::{CivilDateTime, J2000_JD, MINUTES_PER_DAY, calendar_to_jd};
use dashmap::DashMap;
use tracing::debug;

use crate::search_util::bisect_zero;
use crate::solar_term_types::{
    SolarTermBoundary, SolarTermConfig, TermModel, TermMonth, YearTerms,
};

/// Mean tropical year in days.
const TROPICAL_YEAR_DAYS: f64 = 365.2422;

/// Half-width of the bisection bracket around the mean-motion estimate.
const BRACKET_DAYS: f64 = 5.0;

/// Apparent geocentric ecliptic longitude of the Sun in degrees [0, 360).
pub fn apparent_solar_longitude(jd: f64) -> f64 {
    let t = (jd - J2000_JD) / 36525.0;
    let l0 = 280.46646 + 36000.76983 * t + 0.0003032 * t * t;
    let m = (357.52911 + 35999.05029 * t - 0.0001537 * t * t).to_radians();
    let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin();
    let omega = (125.04 - 1934.136 * t).to_radians();
    normalize_360(l0 + c - 0.00569 - 0.00478 * omega.sin())
}

/// Month confidence given the days left before the next major term.
///
/// 1.0 outside the window; inside it, falls linearly with the remaining
/// distance and is held at `floor` as the term approaches.
pub fn term_confidence(days_to_next: f64, window_days: f64, floor: f64) -> f64 {
    if days_to_next >= window_days {
        return 1.0;
    }
    (days_to_next / window_days).clamp(0.0, 1.0).max(floor)
}

/// Solar-term calculator owning a year-keyed boundary cache.
#[derive(Debug)]
pub struct SolarTermCalculator {
    config: SolarTermConfig,
    cache: DashMap<i32, Arc<YearTerms>>,
}

impl SolarTermCalculator {
    pub fn new(config: SolarTermConfig) -> Self {
        Self {
            config,
            cache: DashMap::new(),
        }
    }

    pub fn config(&self) -> &SolarTermConfig {
        &self.config
    }

    fn offset_days(&self) -> f64 {
        self.config.utc_offset_minutes as f64 / MINUTES_PER_DAY
    }

    /// The 24 boundaries of a Gregorian year, ascending by instant.
    ///
    /// Computed on first request and cached; the cache entry is written
    /// under its shard lock, so concurrent callers never see a partial table.
    pub fn boundaries_for_year(&self, year: i32) -> Result<Arc<YearTerms>, BaziError> {
        if !self.config.supports_year(year) {
            return Err(BaziError::UnresolvedBoundary { year });
        }
        if let Some(hit) = self.cache.get(&year) {
            return Ok(Arc::clone(hit.value()));
        }
        let table = {
            let entry = self
                .cache
                .entry(year)
                .or_try_insert_with(|| self.compute_year(year).map(Arc::new))?;
            Arc::clone(entry.value())
        };
        debug!(
            model = self.config.model.name(),
            cached_years = self.cache.len(),
            "solar-term table resolved"
        );
        Ok(table)
    }

    /// The 12 major (month-opening) boundaries of a year, ascending.
    pub fn major_boundaries(&self, year: i32) -> Result<Vec<SolarTermBoundary>, BaziError> {
        Ok(self
            .boundaries_for_year(year)?
            .iter()
            .filter(|b| b.is_major())
            .copied()
            .collect())
    }

    /// A specific term within a year's table.
    pub fn boundary(&self, year: i32, term: SolarTerm) -> Result<SolarTermBoundary, BaziError> {
        self.boundaries_for_year(year)?
            .iter()
            .find(|b| b.term == term)
            .copied()
            .ok_or(BaziError::ContractViolation("solar-term table is missing a term"))
    }

    /// The chart month containing the instant `jd_ut`.
    ///
    /// Looks back into the previous year's table when no major term of the
    /// civil year precedes the instant, and forward into the next year's
    /// when the month is still open at year end.
    pub fn month_by_term(&self, jd_ut: f64) -> Result<TermMonth, BaziError> {
        let year = self.civil_year_of(jd_ut);
        let majors = self.major_boundaries(year)?;

        let (started, next) = match majors.iter().rposition(|b| b.jd_ut <= jd_ut) {
            Some(i) => {
                let next = match majors.get(i + 1) {
                    Some(b) => *b,
                    None => first_major(&self.major_boundaries(year + 1)?)?,
                };
                (majors[i], next)
            }
            None => {
                let prev = self.major_boundaries(year - 1)?;
                let started = prev
                    .last()
                    .copied()
                    .ok_or(BaziError::UnresolvedBoundary { year: year - 1 })?;
                (started, first_major(&majors)?)
            }
        };

        let month = started
            .month_number()
            .ok_or(BaziError::ContractViolation("month opened by a minor term"))?;
        let term_year = self.chart_year(jd_ut, year)?;
        let confidence = term_confidence(
            next.jd_ut - jd_ut,
            self.config.confidence_window_days,
            self.config.confidence_floor,
        );

        Ok(TermMonth {
            term_year,
            month,
            started,
            next,
            confidence,
        })
    }

    /// Opening boundary of chart month `month` (1..=12) in chart year `chart_year`.
    pub fn term_month_start(
        &self,
        chart_year: i32,
        month: u32,
    ) -> Result<SolarTermBoundary, BaziError> {
        if !(1..=12).contains(&month) {
            return Err(BaziError::ContractViolation("term month must be in 1..=12"));
        }
        let lichun = self.boundary(chart_year, SolarTerm::Lichun)?;
        let target = SolarTerm::for_month(month);
        for year in [chart_year, chart_year + 1] {
            let found = self
                .boundaries_for_year(year)?
                .iter()
                .find(|b| b.term == target && b.jd_ut >= lichun.jd_ut)
                .copied();
            if let Some(b) = found {
                return Ok(b);
            }
        }
        Err(BaziError::UnresolvedBoundary {
            year: chart_year + 1,
        })
    }

    /// True when `err` only reports a year outside the supported window.
    pub fn is_outside_window(&self, err: &BaziError) -> bool {
        matches!(err, BaziError::UnresolvedBoundary { year } if !self.config.supports_year(*year))
    }

    /// Drop every cached year.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Years currently cached, ascending.
    pub fn cached_years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.cache.iter().map(|e| *e.key()).collect();
        years.sort_unstable();
        years
    }

    /// Gregorian year of `jd_ut` on the term-zone clock.
    pub fn civil_year_of(&self, jd_ut: f64) -> i32 {
        CivilDateTime::from_jd(jd_ut + self.offset_days()).year
    }

    /// Chart year of `jd_ut`: the year of the latest Lichun at or before it.
    fn chart_year(&self, jd_ut: f64, civil_year: i32) -> Result<i32, BaziError> {
        let lichun = self.boundary(civil_year, SolarTerm::Lichun)?;
        Ok(if jd_ut >= lichun.jd_ut {
            civil_year
        } else {
            civil_year - 1
        })
    }

    fn compute_year(&self, year: i32) -> Result<YearTerms, BaziError> {
        let offset_days = self.offset_days();
        let jan1_ut = calendar_to_jd(year, 1, 1.0) - offset_days;

        let mut list = ALL_SOLAR_TERMS
            .iter()
            .map(|&term| {
                let jd_ut = match self.config.model {
                    TermModel::SolarLongitude => self.solve_longitude(year, term, jan1_ut)?,
                    TermModel::LinearDayOffset => jan1_ut + term.longitude_deg().floor(),
                };
                Ok(SolarTermBoundary {
                    term,
                    kind: term.kind(),
                    longitude_deg: term.longitude_deg(),
                    year,
                    jd_ut,
                    local: CivilDateTime::from_jd(jd_ut + offset_days),
                })
            })
            .collect::<Result<Vec<_>, BaziError>>()?;
        list.sort_by(|a, b| a.jd_ut.total_cmp(&b.jd_ut));

        list.try_into()
            .map_err(|_| BaziError::ContractViolation("solar-term table must hold 24 entries"))
    }

    fn solve_longitude(&self, year: i32, term: SolarTerm, jan1_ut: f64) -> Result<f64, BaziError> {
        let target = term.longitude_deg();
        let ahead = normalize_360(target - apparent_solar_longitude(jan1_ut));
        let estimate = jan1_ut + ahead * TROPICAL_YEAR_DAYS / 360.0;
        bisect_zero(
            estimate - BRACKET_DAYS,
            estimate + BRACKET_DAYS,
            self.config.max_iterations,
            self.config.convergence_days,
            |t| normalize_pm180(apparent_solar_longitude(t) - target),
        )
        .ok_or(BaziError::UnresolvedBoundary { year })
    }
}

fn first_major(majors: &[SolarTermBoundary]) -> Result<SolarTermBoundary, BaziError> {
    majors
        .first()
        .copied()
        .ok_or(BaziError::ContractViolation("year has no major terms"))
}
