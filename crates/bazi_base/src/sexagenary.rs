//! Sexagenary (60-year) cycle.
//!
//! The 60 stem-branch pairs cycle continuously. The epoch is CE 4 = Jia-Zi
//! (order 1), which places CE 1984 and 2044 at Jia-Zi as well.

use crate::pillar::Pillar;

/// Reference epoch: CE 4 = Jia-Zi (order 1, index 0).
pub const SEXAGENARY_EPOCH_YEAR: i32 = 4;

/// Determine the cycle pair for a given CE year.
///
/// Returns `(pillar, order)` where order is 1-based (1..=60). This is the
/// civil-year assignment; charts switch years at the start of spring.
pub fn sexagenary_from_year(ce_year: i32) -> (Pillar, u8) {
    let offset = (ce_year as i64 - SEXAGENARY_EPOCH_YEAR as i64).rem_euclid(60);
    (Pillar::from_sexagenary(offset), offset as u8 + 1)
}
