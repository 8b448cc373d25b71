//! The 12 earthly branches (dizhi) and their hidden stems.
//!
//! Branch 0 (Zi) is the month of the winter solstice and the two-hour
//! window around midnight. Each branch hides 1-3 stems, listed dominant
//! first with weights summing to 1.0.

use serde::Serialize;

use crate::element::Element;
use crate::stem::{Polarity, Stem};

/// A stem contained within a branch, with its relative weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HiddenStem {
    pub stem: Stem,
    pub weight: f64,
}

const fn hs(stem: Stem, weight: f64) -> HiddenStem {
    HiddenStem { stem, weight }
}

/// An earthly branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

/// All 12 branches in cyclic order (index 0 = Zi).
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Zi,
    Branch::Chou,
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
    Branch::Hai,
];

const BRANCH_NAMES: [&str; 12] = [
    "Zi", "Chou", "Yin", "Mao", "Chen", "Si", "Wu", "Wei", "Shen", "You", "Xu", "Hai",
];

const BRANCH_HANZI: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

const ZODIAC_ANIMALS: [&str; 12] = [
    "rat", "ox", "tiger", "rabbit", "dragon", "snake", "horse", "goat", "monkey", "rooster",
    "dog", "pig",
];

const BRANCH_ELEMENTS: [Element; 12] = [
    Element::Water,
    Element::Earth,
    Element::Wood,
    Element::Wood,
    Element::Earth,
    Element::Fire,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Metal,
    Element::Earth,
    Element::Water,
];

const HIDDEN_ZI: [HiddenStem; 1] = [hs(Stem::Gui, 1.0)];
const HIDDEN_CHOU: [HiddenStem; 3] = [hs(Stem::Ji, 0.6), hs(Stem::Gui, 0.3), hs(Stem::Xin, 0.1)];
const HIDDEN_YIN: [HiddenStem; 3] = [hs(Stem::Jia, 0.6), hs(Stem::Bing, 0.3), hs(Stem::Wu, 0.1)];
const HIDDEN_MAO: [HiddenStem; 1] = [hs(Stem::Yi, 1.0)];
const HIDDEN_CHEN: [HiddenStem; 3] = [hs(Stem::Wu, 0.6), hs(Stem::Yi, 0.3), hs(Stem::Gui, 0.1)];
const HIDDEN_SI: [HiddenStem; 3] = [hs(Stem::Bing, 0.6), hs(Stem::Geng, 0.3), hs(Stem::Wu, 0.1)];
const HIDDEN_WU: [HiddenStem; 2] = [hs(Stem::Ding, 0.7), hs(Stem::Ji, 0.3)];
const HIDDEN_WEI: [HiddenStem; 3] = [hs(Stem::Ji, 0.6), hs(Stem::Ding, 0.3), hs(Stem::Yi, 0.1)];
const HIDDEN_SHEN: [HiddenStem; 3] =
    [hs(Stem::Geng, 0.6), hs(Stem::Ren, 0.3), hs(Stem::Wu, 0.1)];
const HIDDEN_YOU: [HiddenStem; 1] = [hs(Stem::Xin, 1.0)];
const HIDDEN_XU: [HiddenStem; 3] = [hs(Stem::Wu, 0.6), hs(Stem::Xin, 0.3), hs(Stem::Ding, 0.1)];
const HIDDEN_HAI: [HiddenStem; 2] = [hs(Stem::Ren, 0.7), hs(Stem::Jia, 0.3)];

impl Branch {
    /// 0-based index (Zi=0 .. Hai=11).
    pub const fn index(self) -> u8 {
        match self {
            Self::Zi => 0,
            Self::Chou => 1,
            Self::Yin => 2,
            Self::Mao => 3,
            Self::Chen => 4,
            Self::Si => 5,
            Self::Wu => 6,
            Self::Wei => 7,
            Self::Shen => 8,
            Self::You => 9,
            Self::Xu => 10,
            Self::Hai => 11,
        }
    }

    /// Branch at a cyclic index; any integer wraps modulo 12.
    pub const fn from_index(index: i64) -> Self {
        ALL_BRANCHES[index.rem_euclid(12) as usize]
    }

    /// Pinyin name.
    pub const fn name(self) -> &'static str {
        BRANCH_NAMES[self.index() as usize]
    }

    pub const fn hanzi(self) -> &'static str {
        BRANCH_HANZI[self.index() as usize]
    }

    pub const fn zodiac_animal(self) -> &'static str {
        ZODIAC_ANIMALS[self.index() as usize]
    }

    pub const fn element(self) -> Element {
        BRANCH_ELEMENTS[self.index() as usize]
    }

    pub const fn polarity(self) -> Polarity {
        Polarity::of_index(self.index())
    }

    /// Hidden stems, dominant first.
    pub const fn hidden_stems(self) -> &'static [HiddenStem] {
        match self {
            Self::Zi => &HIDDEN_ZI,
            Self::Chou => &HIDDEN_CHOU,
            Self::Yin => &HIDDEN_YIN,
            Self::Mao => &HIDDEN_MAO,
            Self::Chen => &HIDDEN_CHEN,
            Self::Si => &HIDDEN_SI,
            Self::Wu => &HIDDEN_WU,
            Self::Wei => &HIDDEN_WEI,
            Self::Shen => &HIDDEN_SHEN,
            Self::You => &HIDDEN_YOU,
            Self::Xu => &HIDDEN_XU,
            Self::Hai => &HIDDEN_HAI,
        }
    }

    /// The dominant (main qi) hidden stem.
    pub const fn main_stem(self) -> Stem {
        self.hidden_stems()[0].stem
    }

    /// Look up a branch by pinyin name (case-insensitive) or hanzi.
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        ALL_BRANCHES
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(s) || b.hanzi() == s)
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_sequential() {
        for (i, b) in ALL_BRANCHES.iter().enumerate() {
            assert_eq!(b.index() as usize, i);
            assert_eq!(Branch::from_index(i as i64 + 24), *b);
        }
    }

    #[test]
    fn hidden_stem_counts() {
        for b in ALL_BRANCHES {
            let n = b.hidden_stems().len();
            assert!((1..=3).contains(&n), "{b}: {n} hidden stems");
        }
    }

    #[test]
    fn hidden_weights_sum_to_one() {
        for b in ALL_BRANCHES {
            let sum: f64 = b.hidden_stems().iter().map(|h| h.weight).sum();
            assert!((sum - 1.0).abs() < 1e-12, "{b}: sum {sum}");
        }
    }

    #[test]
    fn hidden_stems_dominant_first() {
        for b in ALL_BRANCHES {
            let w: Vec<f64> = b.hidden_stems().iter().map(|h| h.weight).collect();
            assert!(w.windows(2).all(|p| p[0] >= p[1]), "{b}: {w:?}");
        }
    }

    #[test]
    fn main_stem_matches_branch_element() {
        for b in ALL_BRANCHES {
            assert_eq!(b.main_stem().element(), b.element(), "{b}");
        }
    }

    #[test]
    fn animals() {
        assert_eq!(Branch::Zi.zodiac_animal(), "rat");
        assert_eq!(Branch::Chen.zodiac_animal(), "dragon");
        assert_eq!(Branch::Hai.zodiac_animal(), "pig");
    }
}
