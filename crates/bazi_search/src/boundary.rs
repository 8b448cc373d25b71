//! Boundary-sensitivity analysis.
//!
//! Flags instants that sit close enough to a pillar change for an imprecise
//! birth time to flip the assignment:
//! - month: within `window_days` of any major term (neighbouring years
//!   included, so late-December and early-January instants see every term)
//! - year: within `window_days` of Lichun
//! - hour: within `hour_window_minutes` of an odd-hour branch change on the
//!   local solar clock
//!
//! Overall confidence starts at 1.0 and is only lowered.

use bazi_base::{BaziError, SolarTerm};
use bazi_time::MINUTES_PER_DAY;
use tracing::trace;

use crate::boundary_types::{
    BoundaryCheckResult, BoundaryConfig, BoundaryKind, BoundarySide, BoundaryTrigger,
};
use crate::solar_term::SolarTermCalculator;

/// Minutes in one two-hour branch window.
const BRANCH_WINDOW_MINUTES: f64 = 120.0;

/// Branch changes fall on odd hours; this is the first one after midnight.
const FIRST_BRANCH_CHANGE_MINUTE: f64 = 60.0;

/// Minutes since the last branch change and until the next one.
pub fn hour_boundary_distances(minute_of_day: f64) -> (f64, f64) {
    let since = (minute_of_day - FIRST_BRANCH_CHANGE_MINUTE).rem_euclid(BRANCH_WINDOW_MINUTES);
    (since, BRANCH_WINDOW_MINUTES - since)
}

/// Stateless analyzer; solar terms come from the calculator passed in.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundaryAnalyzer {
    config: BoundaryConfig,
}

impl BoundaryAnalyzer {
    pub fn new(config: BoundaryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BoundaryConfig {
        &self.config
    }

    /// Check `jd_ut` against month, year and (when the time is known) hour
    /// boundaries. `local_minute_of_day` is minutes after midnight on the
    /// clock the hour pillar is read from; `None` skips the hour check.
    pub fn check(
        &self,
        calculator: &SolarTermCalculator,
        jd_ut: f64,
        local_minute_of_day: Option<f64>,
    ) -> Result<BoundaryCheckResult, BaziError> {
        let mut result = BoundaryCheckResult::default();
        self.check_terms(calculator, jd_ut, &mut result)?;
        if let Some(minute) = local_minute_of_day {
            self.check_hour(jd_ut, minute, &mut result);
        }
        trace!(
            triggers = result.triggers.len(),
            confidence = result.confidence,
            "boundary check"
        );
        Ok(result)
    }

    fn check_terms(
        &self,
        calculator: &SolarTermCalculator,
        jd_ut: f64,
        result: &mut BoundaryCheckResult,
    ) -> Result<(), BaziError> {
        let year = calculator.civil_year_of(jd_ut);
        for y in [year - 1, year, year + 1] {
            if y != year && !calculator.config().supports_year(y) {
                continue;
            }
            for b in calculator.major_boundaries(y)? {
                let distance_days = jd_ut - b.jd_ut;
                if distance_days.abs() > self.config.window_days {
                    continue;
                }
                let trigger = BoundaryTrigger {
                    kind: BoundaryKind::Month,
                    term: Some(b.term),
                    boundary_jd_ut: b.jd_ut,
                    distance_minutes: distance_days * MINUTES_PER_DAY,
                    side: BoundarySide::of(jd_ut, b.jd_ut),
                    confidence: self.config.confidence_cap,
                };
                result.push(trigger);
                if b.term == SolarTerm::Lichun {
                    result.push(BoundaryTrigger {
                        kind: BoundaryKind::Year,
                        ..trigger
                    });
                }
            }
        }
        Ok(())
    }

    fn check_hour(&self, jd_ut: f64, minute_of_day: f64, result: &mut BoundaryCheckResult) {
        let (since, until) = hour_boundary_distances(minute_of_day);
        let (distance, signed, side) = if since <= until {
            (since, since, BoundarySide::After)
        } else {
            (until, -until, BoundarySide::Before)
        };
        if distance >= self.config.hour_window_minutes {
            return;
        }
        let confidence = (distance / self.config.hour_window_minutes).max(self.config.hour_floor);
        result.push(BoundaryTrigger {
            kind: BoundaryKind::Hour,
            term: None,
            boundary_jd_ut: jd_ut - signed / MINUTES_PER_DAY,
            distance_minutes: signed,
            side,
            confidence,
        });
    }
}
