//! Luck-pillar, annual and monthly timeline.
//!
//! Luck pillars step along the 60-cycle from the month pillar, one per
//! `luck_span_years`, starting at the age given by the distance to the
//! adjacent major term. Annual pillars run year by year from the birth
//! year. Monthly pillars cover a bounded window of chart years, each opened
//! by its Lichun.

use bazi_base::{
    BaziError, LuckDirection, Pillar, SolarTerm, Stem, TenGod, luck_pillar_sequence,
    luck_start_age_years, month_pillar_for_term_month, ten_god, year_pillar,
};
use bazi_time::CivilDateTime;
use serde::{Deserialize, Serialize};

use crate::solar_term::SolarTermCalculator;
use crate::solar_term_types::TermMonth;

/// How much timeline to render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimelineConfig {
    pub luck_pillar_count: usize,
    pub luck_span_years: u32,
    pub annual_years: usize,
    /// First chart year of the monthly breakdown; the birth chart year when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_from_year: Option<i32>,
    pub monthly_years: usize,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            luck_pillar_count: 8,
            luck_span_years: 10,
            annual_years: 10,
            monthly_from_year: None,
            monthly_years: 1,
        }
    }
}

impl TimelineConfig {
    /// Validate the configuration.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if self.luck_pillar_count == 0 || self.luck_pillar_count > 12 {
            return Err("timeline.luck_pillar_count must be in 1..=12");
        }
        if self.luck_span_years == 0 || self.luck_span_years > 20 {
            return Err("timeline.luck_span_years must be in 1..=20");
        }
        if self.annual_years > 150 {
            return Err("timeline.annual_years must not exceed 150");
        }
        if self.monthly_years > 10 {
            return Err("timeline.monthly_years must not exceed 10");
        }
        Ok(())
    }
}

/// One luck pillar span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LuckPillar {
    /// 1-based position in the sequence.
    pub index: usize,
    pub pillar: Pillar,
    pub start_age: f64,
    pub end_age: f64,
    pub start_year: i32,
    pub relationship: TenGod,
}

/// Pillar of one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualPillar {
    pub year: i32,
    pub age: u32,
    pub pillar: Pillar,
    pub relationship: TenGod,
}

/// Pillar of one chart month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPillar {
    /// Chart year.
    pub year: i32,
    pub month: u32,
    pub term: SolarTerm,
    /// Opening instant on the term-zone clock.
    pub start: CivilDateTime,
    pub pillar: Pillar,
    pub relationship: TenGod,
}

/// The assembled timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub direction: LuckDirection,
    pub start_age_years: f64,
    pub luck_pillars: Vec<LuckPillar>,
    pub annual_pillars: Vec<AnnualPillar>,
    pub monthly_pillars: Vec<MonthlyPillar>,
}

/// What the timeline needs from the assembled chart.
#[derive(Debug, Clone, Copy)]
pub struct TimelineInput {
    pub jd_ut: f64,
    /// Civil birth year.
    pub birth_year: i32,
    pub term_month: TermMonth,
    pub month_pillar: Pillar,
    pub day_master: Stem,
    pub direction: LuckDirection,
}

/// Build the timeline for a chart.
pub fn build_timeline(
    calculator: &SolarTermCalculator,
    config: &TimelineConfig,
    input: &TimelineInput,
) -> Result<Timeline, BaziError> {
    let days = match input.direction {
        LuckDirection::Forward => input.term_month.days_to_next(input.jd_ut),
        LuckDirection::Reverse => input.term_month.days_since_start(input.jd_ut),
    };
    let start_age = luck_start_age_years(days);
    let span = config.luck_span_years as f64;

    let luck_pillars = luck_pillar_sequence(
        &input.month_pillar,
        input.direction,
        config.luck_pillar_count,
    )
    .into_iter()
    .enumerate()
    .map(|(i, pillar)| {
        let start = start_age + i as f64 * span;
        LuckPillar {
            index: i + 1,
            pillar,
            start_age: start,
            end_age: start + span,
            start_year: input.birth_year + start.floor() as i32,
            relationship: ten_god(input.day_master, pillar.stem),
        }
    })
    .collect();

    let annual_pillars = (0..config.annual_years)
        .map(|i| {
            let year = input.birth_year + i as i32;
            let pillar = year_pillar(year);
            AnnualPillar {
                year,
                age: i as u32,
                pillar,
                relationship: ten_god(input.day_master, pillar.stem),
            }
        })
        .collect();

    let window = calculator.config();
    let from = config
        .monthly_from_year
        .unwrap_or(input.term_month.term_year);
    let first = from.max(window.min_year);
    let last = (from + config.monthly_years as i32 - 1).min(window.max_year);
    let mut monthly_pillars = Vec::with_capacity(config.monthly_years * 12);
    'years: for year in first..=last {
        let year_stem = year_pillar(year).stem;
        for month in 1..=12 {
            let start = match calculator.term_month_start(year, month) {
                Ok(b) => b,
                Err(e) if calculator.is_outside_window(&e) => break 'years,
                Err(e) => return Err(e),
            };
            let pillar = month_pillar_for_term_month(year_stem, month);
            monthly_pillars.push(MonthlyPillar {
                year,
                month,
                term: start.term,
                start: start.local,
                pillar,
                relationship: ten_god(input.day_master, pillar.stem),
            });
        }
    }

    Ok(Timeline {
        direction: input.direction,
        start_age_years: start_age,
        luck_pillars,
        annual_pillars,
        monthly_pillars,
    })
}
