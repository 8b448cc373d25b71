//! The 10 heavenly stems (tiangan).
//!
//! Stems pair off by element in generation order (Jia/Yi wood, Bing/Ding
//! fire, ...); even indices are yang, odd indices yin.

use serde::Serialize;

use crate::element::{ALL_ELEMENTS, Element};

/// Yin/yang polarity of a stem or branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Yang,
    Yin,
}

impl Polarity {
    /// Polarity of a cyclic index: even = yang.
    pub const fn of_index(index: u8) -> Self {
        if index % 2 == 0 { Self::Yang } else { Self::Yin }
    }
}

/// A heavenly stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

/// All 10 stems in cyclic order (index 0 = Jia).
pub const ALL_STEMS: [Stem; 10] = [
    Stem::Jia,
    Stem::Yi,
    Stem::Bing,
    Stem::Ding,
    Stem::Wu,
    Stem::Ji,
    Stem::Geng,
    Stem::Xin,
    Stem::Ren,
    Stem::Gui,
];

const STEM_NAMES: [&str; 10] = [
    "Jia", "Yi", "Bing", "Ding", "Wu", "Ji", "Geng", "Xin", "Ren", "Gui",
];

const STEM_HANZI: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

impl Stem {
    /// 0-based index (Jia=0 .. Gui=9).
    pub const fn index(self) -> u8 {
        match self {
            Self::Jia => 0,
            Self::Yi => 1,
            Self::Bing => 2,
            Self::Ding => 3,
            Self::Wu => 4,
            Self::Ji => 5,
            Self::Geng => 6,
            Self::Xin => 7,
            Self::Ren => 8,
            Self::Gui => 9,
        }
    }

    /// Stem at a cyclic index; any integer wraps modulo 10.
    pub const fn from_index(index: i64) -> Self {
        ALL_STEMS[index.rem_euclid(10) as usize]
    }

    /// Pinyin name.
    pub const fn name(self) -> &'static str {
        STEM_NAMES[self.index() as usize]
    }

    pub const fn hanzi(self) -> &'static str {
        STEM_HANZI[self.index() as usize]
    }

    pub const fn element(self) -> Element {
        ALL_ELEMENTS[(self.index() / 2) as usize]
    }

    pub const fn polarity(self) -> Polarity {
        Polarity::of_index(self.index())
    }

    /// Look up a stem by pinyin name (case-insensitive) or hanzi.
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        ALL_STEMS
            .into_iter()
            .find(|st| st.name().eq_ignore_ascii_case(s) || st.hanzi() == s)
    }
}

impl std::fmt::Display for Stem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
