//! Year, month, day and hour pillar formulas.
//!
//! All four are modular counts over fixed epochs:
//! - year: CE 4 is Jia-Zi
//! - month: the "five tigers" rule derives the month stem from the year stem
//! - day: 1949-10-01 (JDN 2 433 191) is a Jia-Zi day
//! - hour: the "five rats" rule derives the hour stem from the day stem
//!
//! These functions never fail for in-domain inputs. Out-of-range integers
//! wrap instead of panicking; rejecting them is the caller's job.

use bazi_time::jdn_from_gregorian;

use crate::branch::Branch;
use crate::pillar::Pillar;
use crate::sexagenary::SEXAGENARY_EPOCH_YEAR;
use crate::stem::Stem;

/// Julian Day Number of a Jia-Zi day (1949-10-01).
pub const DAY_EPOCH_JDN: i64 = 2_433_191;

/// Year pillar of a civil year: stem `(Y − 4) mod 10`, branch `(Y − 4) mod 12`.
pub fn year_pillar(year: i32) -> Pillar {
    let n = year as i64 - SEXAGENARY_EPOCH_YEAR as i64;
    Pillar::new(Stem::from_index(n), Branch::from_index(n))
}

/// Month pillar from the civil month (1..=12).
///
/// Stem `(2·yearStem + month − 1) mod 10`, branch `(month − 1) mod 12`.
/// This ignores solar terms; see [`month_pillar_for_term_month`] for the
/// boundary-accurate form.
pub fn month_pillar(year: i32, month: u32) -> Pillar {
    let ys = year_pillar(year).stem.index() as i64;
    let m = month as i64;
    Pillar::new(Stem::from_index(2 * ys + m - 1), Branch::from_index(m - 1))
}

/// Month pillar for chart month `n` (1 = Yin month opened by Lichun .. 12).
///
/// Branch `(n + 1) mod 12`, stem `(2·yearStem + n + 1) mod 10`: the five
/// tigers rule counted from the Yin month.
pub fn month_pillar_for_term_month(year_stem: Stem, n: u32) -> Pillar {
    let ys = year_stem.index() as i64;
    let n = n as i64;
    Pillar::new(Stem::from_index(2 * ys + n + 1), Branch::from_index(n + 1))
}

/// Day pillar of a Gregorian civil date.
pub fn day_pillar(year: i32, month: u32, day: u32) -> Pillar {
    day_pillar_from_jdn(jdn_from_gregorian(year, month, day))
}

/// Day pillar of a Julian Day Number.
pub fn day_pillar_from_jdn(jdn: i64) -> Pillar {
    Pillar::from_sexagenary(jdn - DAY_EPOCH_JDN)
}

/// Branch of the two-hour window containing `hour` (23:00-00:59 → Zi).
pub fn hour_branch(hour: u32) -> Branch {
    Branch::from_index((hour as i64 + 1) / 2)
}

/// Hour pillar: stem `(2·dayStem + branch) mod 10`.
pub fn hour_pillar(day_stem: Stem, hour: u32) -> Pillar {
    let branch = hour_branch(hour);
    let stem = Stem::from_index(2 * day_stem.index() as i64 + branch.index() as i64);
    Pillar::new(stem, branch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_1990_is_geng_wu() {
        let p = year_pillar(1990);
        assert_eq!((p.stem.index(), p.branch.index()), (6, 6));
        assert_eq!(p.name(), "Geng-Wu");
    }

    #[test]
    fn year_before_epoch() {
        // 3 - 4 = -1 → Gui-Hai
        assert_eq!(year_pillar(3).name(), "Gui-Hai");
    }

    #[test]
    fn civil_month_first_month() {
        // Jia year, month 1 → Jia stem, Zi branch under the civil rule
        let p = month_pillar(1984, 1);
        assert_eq!((p.stem, p.branch), (Stem::Jia, Branch::Zi));
        let p = month_pillar(1984, 12);
        assert_eq!((p.stem, p.branch), (Stem::Yi, Branch::Hai));
    }

    #[test]
    fn five_tigers() {
        // Jia/Ji years open with Bing-Yin, Yi/Geng with Wu-Yin, Bing/Xin with
        // Geng-Yin, Ding/Ren with Ren-Yin, Wu/Gui with Jia-Yin.
        let expected = [Stem::Bing, Stem::Wu, Stem::Geng, Stem::Ren, Stem::Jia];
        for (i, ys) in crate::stem::ALL_STEMS.iter().enumerate() {
            let p = month_pillar_for_term_month(*ys, 1);
            assert_eq!(p.branch, Branch::Yin);
            assert_eq!(p.stem, expected[i % 5], "year stem {ys}");
        }
    }

    #[test]
    fn term_month_12_is_chou() {
        let p = month_pillar_for_term_month(Stem::Ji, 12);
        assert_eq!((p.stem, p.branch), (Stem::Ding, Branch::Chou));
        let p = month_pillar_for_term_month(Stem::Ji, 11);
        assert_eq!((p.stem, p.branch), (Stem::Bing, Branch::Zi));
    }

    #[test]
    fn day_epoch_is_jia_zi() {
        assert_eq!(day_pillar(1949, 10, 1).name(), "Jia-Zi");
    }

    #[test]
    fn known_days() {
        assert_eq!(day_pillar(2000, 1, 1).name(), "Wu-Wu");
        assert_eq!(day_pillar(1990, 6, 15).name(), "Xin-Hai");
        assert_eq!(day_pillar(2024, 2, 4).name(), "Wu-Xu");
    }

    #[test]
    fn consecutive_days_step_the_cycle() {
        let a = day_pillar(2023, 12, 31);
        let b = day_pillar(2024, 1, 1);
        assert_eq!(a.next(), b);
    }

    #[test]
    fn hour_branches() {
        assert_eq!(hour_branch(23), Branch::Zi);
        assert_eq!(hour_branch(0), Branch::Zi);
        assert_eq!(hour_branch(1), Branch::Chou);
        assert_eq!(hour_branch(11), Branch::Wu);
        assert_eq!(hour_branch(12), Branch::Wu);
        assert_eq!(hour_branch(22), Branch::Hai);
    }

    #[test]
    fn five_rats() {
        // Jia/Ji days open with Jia-Zi, Yi/Geng with Bing-Zi
        assert_eq!(hour_pillar(Stem::Jia, 0).stem, Stem::Jia);
        assert_eq!(hour_pillar(Stem::Ji, 0).stem, Stem::Jia);
        assert_eq!(hour_pillar(Stem::Yi, 0).stem, Stem::Bing);
        assert_eq!(hour_pillar(Stem::Wu, 12).name(), "Wu-Wu");
        assert_eq!(hour_pillar(Stem::Xin, 10).name(), "Gui-Si");
    }
}
