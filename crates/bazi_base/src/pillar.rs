//! Stem-branch pillars and the four-pillar set.

use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

use crate::branch::Branch;
use crate::stem::Stem;

/// Chart position of a pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PillarPosition {
    Year,
    Month,
    Day,
    Hour,
}

/// A stem-branch pair, with an optional confidence in [0, 1].
///
/// Stem and branch always share polarity when built through the pillar
/// formulas or [`Pillar::from_sexagenary`]; only such pairs occur in the
/// 60-cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
    pub confidence: Option<f64>,
}

impl Pillar {
    pub const fn new(stem: Stem, branch: Branch) -> Self {
        Self {
            stem,
            branch,
            confidence: None,
        }
    }

    /// Pillar at a position in the 60-cycle (0 = Jia-Zi); wraps modulo 60.
    pub const fn from_sexagenary(index: i64) -> Self {
        let i = index.rem_euclid(60);
        Self::new(Stem::from_index(i), Branch::from_index(i))
    }

    /// 0-based position in the 60-cycle.
    pub const fn sexagenary_index(&self) -> u8 {
        let s = self.stem.index() as i32;
        let b = self.branch.index() as i32;
        (6 * s - 5 * b).rem_euclid(60) as u8
    }

    /// Step `n` places along the 60-cycle (negative steps go back).
    pub const fn offset(&self, n: i64) -> Self {
        Self::from_sexagenary(self.sexagenary_index() as i64 + n)
    }

    pub const fn next(&self) -> Self {
        self.offset(1)
    }

    pub const fn prev(&self) -> Self {
        self.offset(-1)
    }

    /// Attach a confidence, clamped to [0, 1].
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        let c = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.confidence = Some(c);
        self
    }

    /// Confidence, 1.0 when none was attached.
    pub fn confidence(&self) -> f64 {
        self.confidence.unwrap_or(1.0)
    }

    /// Same stem and branch, regardless of confidence.
    pub fn same_ganzhi(&self, other: &Pillar) -> bool {
        self.stem == other.stem && self.branch == other.branch
    }

    /// Pinyin name, e.g. `Jia-Zi`.
    pub fn name(&self) -> String {
        format!("{}-{}", self.stem.name(), self.branch.name())
    }

    /// Hanzi name, e.g. `甲子`.
    pub fn hanzi(&self) -> String {
        format!("{}{}", self.stem.hanzi(), self.branch.hanzi())
    }
}

impl std::fmt::Display for Pillar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.stem.name(), self.branch.name())
    }
}

impl Serialize for Pillar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let n = if self.confidence.is_some() { 5 } else { 4 };
        let mut st = serializer.serialize_struct("Pillar", n)?;
        st.serialize_field("stem", &self.stem)?;
        st.serialize_field("branch", &self.branch)?;
        st.serialize_field("name", &self.name())?;
        st.serialize_field("hanzi", &self.hanzi())?;
        if let Some(c) = self.confidence {
            st.serialize_field("confidence", &c)?;
        }
        st.end()
    }
}

/// Year, month, day and hour pillars of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FourPillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
}

impl FourPillars {
    /// Pillars in chart order (year, month, day, hour).
    pub fn as_array(&self) -> [Pillar; 4] {
        [self.year, self.month, self.day, self.hour]
    }

    pub fn get(&self, position: PillarPosition) -> &Pillar {
        match position {
            PillarPosition::Year => &self.year,
            PillarPosition::Month => &self.month,
            PillarPosition::Day => &self.day,
            PillarPosition::Hour => &self.hour,
        }
    }

    /// Stem of the day pillar.
    pub fn day_master(&self) -> Stem {
        self.day.stem
    }

    /// True when every position has the same stem and branch.
    pub fn same_ganzhi(&self, other: &FourPillars) -> bool {
        self.as_array()
            .iter()
            .zip(other.as_array().iter())
            .all(|(a, b)| a.same_ganzhi(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sexagenary_roundtrip() {
        for i in 0..60 {
            let p = Pillar::from_sexagenary(i);
            assert_eq!(p.sexagenary_index() as i64, i);
        }
    }

    #[test]
    fn known_positions() {
        assert_eq!(Pillar::from_sexagenary(0).name(), "Jia-Zi");
        assert_eq!(Pillar::from_sexagenary(10).name(), "Jia-Xu");
        assert_eq!(Pillar::from_sexagenary(59).name(), "Gui-Hai");
        assert_eq!(Pillar::new(Stem::Geng, Branch::Wu).sexagenary_index(), 6);
    }

    #[test]
    fn offset_wraps() {
        let p = Pillar::from_sexagenary(59);
        assert_eq!(p.next().sexagenary_index(), 0);
        assert_eq!(p.offset(-60).sexagenary_index(), 59);
        assert_eq!(Pillar::from_sexagenary(0).prev().name(), "Gui-Hai");
    }

    #[test]
    fn confidence_defaults_and_clamps() {
        let p = Pillar::new(Stem::Jia, Branch::Zi);
        assert_eq!(p.confidence(), 1.0);
        assert_eq!(p.with_confidence(1.5).confidence(), 1.0);
        assert_eq!(p.with_confidence(-0.1).confidence(), 0.0);
        assert_eq!(p.with_confidence(f64::NAN).confidence(), 0.0);
        assert!(p.same_ganzhi(&p.with_confidence(0.3)));
    }

    #[test]
    fn serialize_omits_missing_confidence() {
        let p = Pillar::new(Stem::Bing, Branch::Yin);
        let v = serde_json::to_value(p).unwrap();
        assert_eq!(v["stem"], "bing");
        assert_eq!(v["branch"], "yin");
        assert_eq!(v["name"], "Bing-Yin");
        assert_eq!(v["hanzi"], "丙寅");
        assert!(v.get("confidence").is_none());
        let v = serde_json::to_value(p.with_confidence(0.5)).unwrap();
        assert_eq!(v["confidence"], 0.5);
    }
}
