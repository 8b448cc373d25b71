//! Civil (wall-clock) calendar date/time.
//!
//! `CivilDateTime` carries no zone: the caller decides which clock it reads
//! (zone civil time, local mean solar time, ...). Conversions to Julian Date
//! are therefore "JD on that clock"; subtract the zone offset to get UT.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};

use crate::error::TimeError;
use crate::julian::{
    MINUTES_PER_DAY, calendar_to_jd, day_of_year, days_in_month, jdn_from_gregorian,
    jdn_to_gregorian,
};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Gregorian calendar date and wall-clock time with sub-second precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CivilDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl CivilDateTime {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Midnight at the start of the given date.
    pub fn date(year: i32, month: u32, day: u32) -> Self {
        Self::new(year, month, day, 0, 0, 0.0)
    }

    /// Check that the fields name a real Gregorian date and a time of day.
    pub fn validate(&self) -> Result<(), TimeError> {
        let max_day =
            days_in_month(self.year, self.month).ok_or(TimeError::InvalidDate("month not in 1..=12"))?;
        if self.day == 0 || self.day > max_day {
            return Err(TimeError::InvalidDate("day outside month"));
        }
        if self.hour > 23 {
            return Err(TimeError::InvalidTime("hour not in 0..=23"));
        }
        if self.minute > 59 {
            return Err(TimeError::InvalidTime("minute not in 0..=59"));
        }
        if !self.second.is_finite() || !(0.0..60.0).contains(&self.second) {
            return Err(TimeError::InvalidTime("second not in [0, 60)"));
        }
        Ok(())
    }

    /// Minutes elapsed since 00:00 on this clock.
    pub fn minute_of_day(&self) -> f64 {
        self.hour as f64 * 60.0 + self.minute as f64 + self.second / 60.0
    }

    /// Julian Date on this clock.
    pub fn to_jd(&self) -> f64 {
        let day_frac = self.day as f64 + self.minute_of_day() / MINUTES_PER_DAY;
        calendar_to_jd(self.year, self.month, day_frac)
    }

    /// Calendar date/time for a Julian Date on the same clock.
    ///
    /// Rounds to whole milliseconds so that minute arithmetic does not
    /// produce `23:59:59.9999` artefacts.
    pub fn from_jd(jd: f64) -> Self {
        let shifted = jd + 0.5;
        let mut jdn = shifted.floor() as i64;
        let mut millis = ((shifted - shifted.floor()) * MILLIS_PER_DAY as f64).round() as i64;
        if millis >= MILLIS_PER_DAY {
            jdn += 1;
            millis -= MILLIS_PER_DAY;
        }
        let (year, month, day) = jdn_to_gregorian(jdn);
        let hour = (millis / 3_600_000) as u32;
        let minute = ((millis % 3_600_000) / 60_000) as u32;
        let second = (millis % 60_000) as f64 / 1000.0;
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Shift by a (possibly fractional, possibly negative) number of minutes.
    pub fn add_minutes(&self, minutes: f64) -> Self {
        if minutes == 0.0 {
            return *self;
        }
        Self::from_jd(self.to_jd() + minutes / MINUTES_PER_DAY)
    }

    /// Julian Day Number of the civil date (time of day ignored).
    pub fn jdn(&self) -> i64 {
        jdn_from_gregorian(self.year, self.month, self.day)
    }

    /// 1-based ordinal day within the year.
    pub fn day_of_year(&self) -> u32 {
        day_of_year(self.year, self.month, self.day)
    }

    /// ISO-8601 calendar date, `YYYY-MM-DD`.
    pub fn iso_date(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl Display for CivilDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let whole = self.second as u32;
        let frac = self.second - whole as f64;
        if frac.abs() < 1e-9 {
            write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
                self.year, self.month, self.day, self.hour, self.minute, whole
            )
        } else {
            write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:06.3}",
                self.year, self.month, self.day, self.hour, self.minute, self.second
            )
        }
    }
}

impl Serialize for CivilDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for CivilDateTime {
    type Err = TimeError;

    /// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM` and `YYYY-MM-DDTHH:MM:SS`
    /// (a space may replace the `T`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(Self::new(
                    dt.year(),
                    dt.month(),
                    dt.day(),
                    dt.hour(),
                    dt.minute(),
                    dt.second() as f64,
                ));
            }
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(|d| Self::date(d.year(), d.month(), d.day()))
            .map_err(|e| TimeError::Parse(format!("{s:?}: {e}")))
    }
}
