//! Luck-pillar (dayun) direction, start age and sequence.
//!
//! Yang-year males and yin-year females count forward from the month
//! pillar; the other two combinations count backward. The start age is the
//! distance to the adjacent major solar term in that direction, three days
//! of distance counting as one year of age.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BaziError;
use crate::pillar::Pillar;
use crate::stem::{Polarity, Stem};

/// Days of term distance per year of luck start age.
pub const DAYS_PER_LUCK_YEAR: f64 = 3.0;

/// Sex at birth, used only to pick the luck direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl FromStr for Sex {
    type Err = BaziError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            _ => Err(BaziError::ContractViolation("sex must be male or female")),
        }
    }
}

/// Direction in which luck pillars step along the 60-cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LuckDirection {
    Forward,
    Reverse,
}

impl LuckDirection {
    pub const fn step(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Reverse => -1,
        }
    }
}

/// Luck direction from the chart's year stem and sex.
pub fn luck_direction(year_stem: Stem, sex: Sex) -> LuckDirection {
    match (year_stem.polarity(), sex) {
        (Polarity::Yang, Sex::Male) | (Polarity::Yin, Sex::Female) => LuckDirection::Forward,
        _ => LuckDirection::Reverse,
    }
}

/// Age in years at which the first luck pillar begins.
pub fn luck_start_age_years(days_to_term: f64) -> f64 {
    days_to_term.abs() / DAYS_PER_LUCK_YEAR
}

/// The first `count` luck pillars after `month_pillar` in `direction`.
pub fn luck_pillar_sequence(
    month_pillar: &Pillar,
    direction: LuckDirection,
    count: usize,
) -> Vec<Pillar> {
    (1..=count as i64)
        .map(|i| month_pillar.offset(i * direction.step()))
        .collect()
}
