//! Longitude-based mean solar time.
//!
//! The Earth turns 1° every 4 minutes, so local mean solar time runs
//! `longitude × 4` minutes ahead of Greenwich. Civil clocks follow a zone
//! meridian instead; the difference between the two is the correction a
//! birth chart applies to the recorded clock time.

/// Minutes of time per degree of longitude.
pub const MINUTES_PER_DEGREE: f64 = 4.0;

/// Mean solar time offset from UT, in minutes, for an east longitude in degrees.
pub fn longitude_offset_minutes(longitude_east_deg: f64) -> f64 {
    longitude_east_deg * MINUTES_PER_DEGREE
}

/// Minutes to add to zone civil time to obtain local mean solar time.
///
/// `utc_offset_minutes` is the civil zone's offset east of UTC
/// (e.g. +480 for UTC+8).
pub fn solar_time_correction_minutes(longitude_east_deg: f64, utc_offset_minutes: i32) -> f64 {
    longitude_offset_minutes(longitude_east_deg) - utc_offset_minutes as f64
}
