//! The 24 solar terms (jieqi).
//!
//! Terms sit at every 15° of apparent solar ecliptic longitude, starting
//! with the spring equinox at 0°. The 12 terms at odd multiples of 15°
//! (Lichun at 315°, Jingzhe at 345°, Qingming at 15°, ...) are the major
//! terms: each one opens a chart month. The others fall mid-month.

use serde::Serialize;

/// Whether a term opens a chart month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TermKind {
    Major,
    Minor,
}

/// One of the 24 solar terms, in ecliptic-longitude order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SolarTerm {
    Chunfen,
    Qingming,
    Guyu,
    Lixia,
    Xiaoman,
    Mangzhong,
    Xiazhi,
    Xiaoshu,
    Dashu,
    Liqiu,
    Chushu,
    Bailu,
    Qiufen,
    Hanlu,
    Shuangjiang,
    Lidong,
    Xiaoxue,
    Daxue,
    Dongzhi,
    Xiaohan,
    Dahan,
    Lichun,
    Yushui,
    Jingzhe,
}

/// All 24 terms in longitude order (index 0 = Chunfen at 0°).
pub const ALL_SOLAR_TERMS: [SolarTerm; 24] = [
    SolarTerm::Chunfen,
    SolarTerm::Qingming,
    SolarTerm::Guyu,
    SolarTerm::Lixia,
    SolarTerm::Xiaoman,
    SolarTerm::Mangzhong,
    SolarTerm::Xiazhi,
    SolarTerm::Xiaoshu,
    SolarTerm::Dashu,
    SolarTerm::Liqiu,
    SolarTerm::Chushu,
    SolarTerm::Bailu,
    SolarTerm::Qiufen,
    SolarTerm::Hanlu,
    SolarTerm::Shuangjiang,
    SolarTerm::Lidong,
    SolarTerm::Xiaoxue,
    SolarTerm::Daxue,
    SolarTerm::Dongzhi,
    SolarTerm::Xiaohan,
    SolarTerm::Dahan,
    SolarTerm::Lichun,
    SolarTerm::Yushui,
    SolarTerm::Jingzhe,
];

const TERM_NAMES: [&str; 24] = [
    "Chunfen",
    "Qingming",
    "Guyu",
    "Lixia",
    "Xiaoman",
    "Mangzhong",
    "Xiazhi",
    "Xiaoshu",
    "Dashu",
    "Liqiu",
    "Chushu",
    "Bailu",
    "Qiufen",
    "Hanlu",
    "Shuangjiang",
    "Lidong",
    "Xiaoxue",
    "Daxue",
    "Dongzhi",
    "Xiaohan",
    "Dahan",
    "Lichun",
    "Yushui",
    "Jingzhe",
];

const TERM_ENGLISH: [&str; 24] = [
    "Spring Equinox",
    "Clear and Bright",
    "Grain Rain",
    "Start of Summer",
    "Grain Buds",
    "Grain in Ear",
    "Summer Solstice",
    "Minor Heat",
    "Major Heat",
    "Start of Autumn",
    "End of Heat",
    "White Dew",
    "Autumn Equinox",
    "Cold Dew",
    "Frost's Descent",
    "Start of Winter",
    "Minor Snow",
    "Major Snow",
    "Winter Solstice",
    "Minor Cold",
    "Major Cold",
    "Start of Spring",
    "Rain Water",
    "Awakening of Insects",
];

const TERM_HANZI: [&str; 24] = [
    "春分", "清明", "谷雨", "立夏", "小满", "芒种", "夏至", "小暑", "大暑", "立秋", "处暑", "白露",
    "秋分", "寒露", "霜降", "立冬", "小雪", "大雪", "冬至", "小寒", "大寒", "立春", "雨水", "惊蛰",
];

impl SolarTerm {
    /// 0-based index (Chunfen=0 .. Jingzhe=23).
    pub const fn index(self) -> u8 {
        match self {
            Self::Chunfen => 0,
            Self::Qingming => 1,
            Self::Guyu => 2,
            Self::Lixia => 3,
            Self::Xiaoman => 4,
            Self::Mangzhong => 5,
            Self::Xiazhi => 6,
            Self::Xiaoshu => 7,
            Self::Dashu => 8,
            Self::Liqiu => 9,
            Self::Chushu => 10,
            Self::Bailu => 11,
            Self::Qiufen => 12,
            Self::Hanlu => 13,
            Self::Shuangjiang => 14,
            Self::Lidong => 15,
            Self::Xiaoxue => 16,
            Self::Daxue => 17,
            Self::Dongzhi => 18,
            Self::Xiaohan => 19,
            Self::Dahan => 20,
            Self::Lichun => 21,
            Self::Yushui => 22,
            Self::Jingzhe => 23,
        }
    }

    /// Pinyin name.
    pub const fn name(self) -> &'static str {
        TERM_NAMES[self.index() as usize]
    }

    pub const fn english_name(self) -> &'static str {
        TERM_ENGLISH[self.index() as usize]
    }

    pub const fn hanzi(self) -> &'static str {
        TERM_HANZI[self.index() as usize]
    }

    /// Target apparent solar longitude in degrees (multiple of 15).
    pub const fn longitude_deg(self) -> f64 {
        self.index() as f64 * 15.0
    }

    pub const fn kind(self) -> TermKind {
        if self.index() % 2 == 1 {
            TermKind::Major
        } else {
            TermKind::Minor
        }
    }

    pub const fn is_major(self) -> bool {
        matches!(self.kind(), TermKind::Major)
    }

    /// Chart month opened by a major term (Lichun = 1 .. Xiaohan = 12).
    ///
    /// Returns `None` for minor terms.
    pub const fn month_number(self) -> Option<u32> {
        if !self.is_major() {
            return None;
        }
        let steps = (self.index() as i32 - Self::Lichun.index() as i32).rem_euclid(24);
        Some(steps as u32 / 2 + 1)
    }

    /// Term at a longitude index; any integer wraps modulo 24.
    pub const fn from_index(index: i64) -> Self {
        ALL_SOLAR_TERMS[index.rem_euclid(24) as usize]
    }

    /// Major term opening chart month `n` (1..=12, wraps).
    pub const fn for_month(n: u32) -> Self {
        Self::from_index(Self::Lichun.index() as i64 + 2 * (n as i64 - 1))
    }
}
