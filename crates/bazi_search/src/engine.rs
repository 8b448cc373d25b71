//! Chart assembly.
//!
//! Pipeline for one birth record:
//! 1. validate and resolve the instant (UT for solar terms, local mean
//!    solar time for the day and hour pillars)
//! 2. year and month pillars from the solar-term month (the year turns at
//!    Lichun); the civil-month pillar is kept as a diagnostic only
//! 3. day and hour pillars from the corrected local clock
//! 4. boundary sensitivity, pillar confidences and alternative candidates
//! 5. element and ten-relationship tallies, timeline, answer cards

use std::sync::Arc;

use bazi_base::{
    BaziError, FourPillars, Pillar, PillarPosition, day_pillar, hour_pillar, luck_direction,
    month_pillar, month_pillar_for_term_month, normalize_pm180, year_pillar,
};
use bazi_time::{CivilDateTime, MINUTES_PER_DAY, solar_time_correction_minutes};
use tracing::debug;

use crate::boundary::BoundaryAnalyzer;
use crate::boundary_types::{BoundaryCheckResult, BoundaryKind, BoundarySide};
use crate::cards::{AnswerCardSource, TemplateCards};
use crate::chart_types::{BirthInput, Candidate, Chart, ChartReport, Diagnostics};
use crate::config::EngineConfig;
use crate::error::ChartError;
use crate::solar_term::SolarTermCalculator;
use crate::solar_term_types::TermMonth;
use crate::timeline::{TimelineInput, build_timeline};

/// Minutes past a boundary at which an alternative chart is read.
const ALT_STEP_MINUTES: f64 = 1.0;

/// Furthest a birth longitude may sit from the default zone meridian when
/// the record carries no UTC offset of its own (three hours of clock).
const MAX_IMPLICIT_ZONE_DEG: f64 = 45.0;

/// A birth record pinned to the clocks the pillars are read from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedInstant {
    /// Recorded clock time (placeholder hour when unknown).
    pub civil: CivilDateTime,
    /// Local mean solar time, or `civil` when no correction applies.
    pub local: CivilDateTime,
    pub jd_ut: f64,
    pub utc_offset_minutes: i32,
    pub solar_offset_minutes: f64,
    pub hour_known: bool,
}

/// Four-pillar chart engine.
///
/// Owns the solar-term cache; share one engine across requests.
pub struct BaziEngine {
    config: EngineConfig,
    calculator: SolarTermCalculator,
    analyzer: BoundaryAnalyzer,
    cards: Arc<dyn AnswerCardSource>,
}

impl std::fmt::Debug for BaziEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaziEngine")
            .field("config", &self.config)
            .field("cached_years", &self.calculator.cached_years().len())
            .finish_non_exhaustive()
    }
}

impl BaziEngine {
    /// Create an engine after validating `config`.
    pub fn new(config: EngineConfig) -> Result<Self, ChartError> {
        config.validate()?;
        Ok(Self {
            calculator: SolarTermCalculator::new(config.solar_terms),
            analyzer: BoundaryAnalyzer::new(config.boundary),
            cards: Arc::new(TemplateCards),
            config,
        })
    }

    /// Replace the answer-card interpreter.
    pub fn with_card_source(mut self, source: Arc<dyn AnswerCardSource>) -> Self {
        self.cards = source;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn calculator(&self) -> &SolarTermCalculator {
        &self.calculator
    }

    /// Validate a birth record and resolve its instants.
    pub fn resolve(&self, input: &BirthInput) -> Result<ResolvedInstant, ChartError> {
        input.validate()?;
        let civil = input.civil_time(self.config.boundary.unknown_time_hour);
        civil.validate()?;

        let utc_offset_minutes = input
            .utc_offset_minutes
            .unwrap_or(self.config.solar_terms.utc_offset_minutes);
        let jd_ut = civil.to_jd() - utc_offset_minutes as f64 / MINUTES_PER_DAY;
        let hour_known = input.time.is_known();

        let solar_offset_minutes = match input.geo {
            Some(geo) if self.config.solar_time_correction && hour_known => {
                let zone_meridian = utc_offset_minutes as f64 / 4.0;
                if input.utc_offset_minutes.is_none()
                    && normalize_pm180(geo.lon - zone_meridian).abs() > MAX_IMPLICIT_ZONE_DEG
                {
                    return Err(BaziError::ContractViolation(
                        "utc offset required for a longitude far from the term zone",
                    )
                    .into());
                }
                solar_time_correction_minutes(geo.lon, utc_offset_minutes)
            }
            _ => 0.0,
        };

        Ok(ResolvedInstant {
            civil,
            local: civil.add_minutes(solar_offset_minutes),
            jd_ut,
            utc_offset_minutes,
            solar_offset_minutes,
            hour_known,
        })
    }

    /// Boundary sensitivity of a birth record and the alternative charts
    /// across each triggered boundary, without assembling the full report.
    pub fn check_boundaries(&self, input: &BirthInput) -> Result<BoundaryCheckResult, ChartError> {
        let inst = self.resolve(input)?;
        let (_, primary) = self.primary_pillars(&inst)?;
        let mut boundary = self.boundary_check(&inst)?;
        boundary.candidates = self.candidates(&inst, &primary, &boundary)?;
        Ok(boundary)
    }

    /// Assemble the full chart for a birth record.
    pub fn compute(&self, input: &BirthInput) -> Result<ChartReport, ChartError> {
        let inst = self.resolve(input)?;
        let (term, primary) = self.primary_pillars(&inst)?;
        let FourPillars {
            year, month, day, ..
        } = primary;

        let boundary = self.boundary_check(&inst)?;
        let candidates = self.candidates(&inst, &primary, &boundary)?;
        let pillars = self.with_confidences(primary, &term, &boundary, &candidates, inst.hour_known);
        let chart = Chart::from_pillars(pillars);

        let civil_month_pillar = month_pillar(inst.civil.year, inst.civil.month);
        let direction = luck_direction(year.stem, input.sex);
        let timeline = build_timeline(
            &self.calculator,
            &self.config.timeline,
            &TimelineInput {
                jd_ut: inst.jd_ut,
                birth_year: inst.civil.year,
                term_month: term,
                month_pillar: month,
                day_master: day.stem,
                direction,
            },
        )?;

        let mut report = ChartReport {
            day_master: chart.day_master(),
            stem_gods: chart.stem_gods(),
            chart,
            hour_known: inst.hour_known,
            normalized_instant: inst.local,
            boundary_alert: boundary,
            candidates,
            timeline,
            answer_cards: Vec::new(),
            diagnostics: Diagnostics {
                term_model: self.config.solar_terms.model,
                utc_offset_minutes: inst.utc_offset_minutes,
                solar_time_offset_minutes: inst.solar_offset_minutes,
                term_month: term,
                civil_month_pillar,
                month_sources_agree: civil_month_pillar.same_ganzhi(&month),
                luck_direction: direction,
            },
        };
        if self.config.include_answer_cards {
            report.answer_cards = self.cards.cards(&report);
        }

        debug!(
            hour_known = report.hour_known,
            boundary_alert = report.boundary_alert.is_alert(),
            candidates = report.candidates.len(),
            "chart assembled"
        );
        Ok(report)
    }

    fn primary_pillars(
        &self,
        inst: &ResolvedInstant,
    ) -> Result<(TermMonth, FourPillars), ChartError> {
        let term = self.calculator.month_by_term(inst.jd_ut)?;
        let (year, month) = year_month_pillars(&term);
        let (day, hour) = self.day_hour_pillars(&inst.local);
        Ok((
            term,
            FourPillars {
                year,
                month,
                day,
                hour,
            },
        ))
    }

    fn boundary_check(&self, inst: &ResolvedInstant) -> Result<BoundaryCheckResult, ChartError> {
        let minute = inst.hour_known.then(|| inst.local.minute_of_day());
        Ok(self.analyzer.check(&self.calculator, inst.jd_ut, minute)?)
    }

    fn day_hour_pillars(&self, local: &CivilDateTime) -> (Pillar, Pillar) {
        let mut day = day_pillar(local.year, local.month, local.day);
        if self.config.zi_hour_next_day && local.hour == 23 {
            day = day.next();
        }
        (day, hour_pillar(day.stem, local.hour))
    }

    /// One alternative chart per triggered boundary, read just across it.
    fn candidates(
        &self,
        inst: &ResolvedInstant,
        primary: &FourPillars,
        boundary: &BoundaryCheckResult,
    ) -> Result<Vec<Candidate>, ChartError> {
        let mut out: Vec<Candidate> = Vec::new();
        for trigger in &boundary.triggers {
            let step = match trigger.side {
                BoundarySide::Before => ALT_STEP_MINUTES,
                BoundarySide::After => -ALT_STEP_MINUTES,
            };
            let alt = match trigger.kind {
                BoundaryKind::Month | BoundaryKind::Year => {
                    let jd = trigger.boundary_jd_ut + step / MINUTES_PER_DAY;
                    let term = match self.calculator.month_by_term(jd) {
                        Ok(term) => term,
                        Err(e) if self.calculator.is_outside_window(&e) => continue,
                        Err(e) => return Err(e.into()),
                    };
                    let (year, month) = year_month_pillars(&term);
                    FourPillars {
                        year,
                        month,
                        ..*primary
                    }
                }
                BoundaryKind::Hour => {
                    let local = inst.local.add_minutes(step - trigger.distance_minutes);
                    let (day, hour) = self.day_hour_pillars(&local);
                    FourPillars {
                        day,
                        hour,
                        ..*primary
                    }
                }
            };
            if alt.same_ganzhi(primary) || out.iter().any(|c| c.chart.pillars.same_ganzhi(&alt)) {
                continue;
            }
            out.push(Candidate {
                changed: changed_positions(primary, &alt),
                chart: Chart::from_pillars(alt),
                reason: trigger.kind,
                likelihood: 1.0 - trigger.confidence,
                distance_minutes: trigger.distance_minutes,
            });
        }
        out.sort_by(|a, b| {
            b.likelihood
                .total_cmp(&a.likelihood)
                .then(a.distance_minutes.abs().total_cmp(&b.distance_minutes.abs()))
        });
        Ok(out)
    }

    fn with_confidences(
        &self,
        mut pillars: FourPillars,
        term: &TermMonth,
        boundary: &BoundaryCheckResult,
        candidates: &[Candidate],
        hour_known: bool,
    ) -> FourPillars {
        let cfg = &self.config.boundary;
        if let Some(c) = boundary.confidence_for(BoundaryKind::Year) {
            pillars.year = pillars.year.with_confidence(c);
        }
        let month = boundary
            .confidence_for(BoundaryKind::Month)
            .map_or(term.confidence, |c| c.min(term.confidence));
        if month < 1.0 {
            pillars.month = pillars.month.with_confidence(month);
        }
        let hour = if hour_known {
            boundary.confidence_for(BoundaryKind::Hour).unwrap_or(1.0)
        } else {
            cfg.unknown_time_confidence
        };
        pillars.hour = pillars.hour.with_confidence(hour);
        let day_ambiguous = candidates
            .iter()
            .any(|c| c.reason == BoundaryKind::Hour && c.changed.contains(&PillarPosition::Day));
        if day_ambiguous {
            pillars.day = pillars.day.with_confidence(hour);
        }
        pillars
    }
}

fn year_month_pillars(term: &TermMonth) -> (Pillar, Pillar) {
    let year = year_pillar(term.term_year);
    (year, month_pillar_for_term_month(year.stem, term.month))
}

fn changed_positions(a: &FourPillars, b: &FourPillars) -> Vec<PillarPosition> {
    [
        PillarPosition::Year,
        PillarPosition::Month,
        PillarPosition::Day,
        PillarPosition::Hour,
    ]
    .into_iter()
    .filter(|p| !a.get(*p).same_ganzhi(b.get(*p)))
    .collect()
}
