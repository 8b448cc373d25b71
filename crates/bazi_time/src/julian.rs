//! Julian Day and Gregorian calendar conversions.
//!
//! All conversions use the proleptic Gregorian calendar, including dates
//! before the 1582 reform. Astronomical year numbering: 1 BC is year 0.

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Seconds in a civil day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Minutes in a civil day.
pub const MINUTES_PER_DAY: f64 = 1_440.0;

/// Gregorian leap-year rule.
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`, or `None` if `month` is not 1..=12.
pub const fn days_in_month(year: i32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 => {
            if is_leap_year(year) {
                Some(29)
            } else {
                Some(28)
            }
        }
        _ => None,
    }
}

/// 1-based ordinal day of the year (Jan 1 = 1).
///
/// Callers pass a validated date; months outside 1..=12 contribute nothing.
pub fn day_of_year(year: i32, month: u32, day: u32) -> u32 {
    (1..month)
        .map(|m| days_in_month(year, m).unwrap_or(0))
        .sum::<u32>()
        + day
}

/// Gregorian calendar date to Julian Date.
///
/// `day_frac` is the day of month plus the fraction of the day elapsed
/// since 00:00, so `calendar_to_jd(2000, 1, 1.5)` is J2000.0.
///
/// Source: Meeus, *Astronomical Algorithms*, ch. 7.
pub fn calendar_to_jd(year: i32, month: u32, day_frac: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day_frac + b - 1524.5
}

/// Gregorian calendar date to integer Julian Day Number.
///
/// The JDN labels the civil day; it equals `floor(JD + 0.5)` for any
/// instant during that day.
///
/// Source: Fliegel & Van Flandern (1968), integer form.
pub fn jdn_from_gregorian(year: i32, month: u32, day: u32) -> i64 {
    let (y, m, d) = (year as i64, month as i64, day as i64);
    (1461 * (y + 4800 + (m - 14) / 12)) / 4 + (367 * (m - 2 - 12 * ((m - 14) / 12))) / 12
        - (3 * ((y + 4900 + (m - 14) / 12) / 100)) / 4
        + d
        - 32075
}

/// Integer Julian Day Number to Gregorian `(year, month, day)`.
///
/// Source: Richards, *Mapping Time* (1998), Gregorian algorithm.
pub fn jdn_to_gregorian(jdn: i64) -> (i32, u32, u32) {
    let f = jdn + 1401 + (((4 * jdn + 274_277) / 146_097) * 3) / 4 - 38;
    let e = 4 * f + 3;
    let g = (e % 1461) / 4;
    let h = 5 * g + 2;
    let day = (h % 153) / 5 + 1;
    let month = (h / 153 + 2) % 12 + 1;
    let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
    (year as i32, month as u32, day as u32)
}
