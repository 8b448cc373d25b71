//! Ten-relationship (ten gods) classification relative to the day master.
//!
//! The five categories follow the element cycles seen from the day master:
//! same element → peer, produced by it → output, dominated by it → wealth,
//! dominating it → officer, producing it → resource. The fuller ten-way
//! split halves each category by whether the two stems share polarity.

use serde::Serialize;

use crate::element::Element;
use crate::stem::Stem;

/// Five-way relationship category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TenRelationship {
    Peer,
    Output,
    Wealth,
    Officer,
    Resource,
}

/// All 5 categories (index 0 = Peer).
pub const ALL_TEN_RELATIONSHIPS: [TenRelationship; 5] = [
    TenRelationship::Peer,
    TenRelationship::Output,
    TenRelationship::Wealth,
    TenRelationship::Officer,
    TenRelationship::Resource,
];

impl TenRelationship {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Peer => "peer",
            Self::Output => "output",
            Self::Wealth => "wealth",
            Self::Officer => "officer",
            Self::Resource => "resource",
        }
    }
}

/// Classify `other` relative to the day-master element `day`.
pub const fn relationship_of_elements(day: Element, other: Element) -> TenRelationship {
    use Element::*;
    use TenRelationship::*;
    match (day, other) {
        (Wood, Wood) => Peer,
        (Wood, Fire) => Output,
        (Wood, Earth) => Wealth,
        (Wood, Metal) => Officer,
        (Wood, Water) => Resource,
        (Fire, Wood) => Resource,
        (Fire, Fire) => Peer,
        (Fire, Earth) => Output,
        (Fire, Metal) => Wealth,
        (Fire, Water) => Officer,
        (Earth, Wood) => Officer,
        (Earth, Fire) => Resource,
        (Earth, Earth) => Peer,
        (Earth, Metal) => Output,
        (Earth, Water) => Wealth,
        (Metal, Wood) => Wealth,
        (Metal, Fire) => Officer,
        (Metal, Earth) => Resource,
        (Metal, Metal) => Peer,
        (Metal, Water) => Output,
        (Water, Wood) => Output,
        (Water, Fire) => Wealth,
        (Water, Earth) => Officer,
        (Water, Metal) => Resource,
        (Water, Water) => Peer,
    }
}

/// Classify `other` relative to the day master `day_stem`.
pub const fn ten_relationship(day_stem: Stem, other: Stem) -> TenRelationship {
    relationship_of_elements(day_stem.element(), other.element())
}

/// Ten-way relationship (category split by polarity match).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TenGod {
    /// Bi Jian: same element, same polarity.
    Friend,
    /// Jie Cai: same element, opposite polarity.
    RobWealth,
    /// Shi Shen
    EatingGod,
    /// Shang Guan
    HurtingOfficer,
    /// Pian Cai
    IndirectWealth,
    /// Zheng Cai
    DirectWealth,
    /// Qi Sha
    SevenKillings,
    /// Zheng Guan
    DirectOfficer,
    /// Pian Yin
    IndirectResource,
    /// Zheng Yin
    DirectResource,
}

impl TenGod {
    /// Collapse to the five-way category.
    pub const fn category(self) -> TenRelationship {
        match self {
            Self::Friend | Self::RobWealth => TenRelationship::Peer,
            Self::EatingGod | Self::HurtingOfficer => TenRelationship::Output,
            Self::IndirectWealth | Self::DirectWealth => TenRelationship::Wealth,
            Self::SevenKillings | Self::DirectOfficer => TenRelationship::Officer,
            Self::IndirectResource | Self::DirectResource => TenRelationship::Resource,
        }
    }

    pub const fn hanzi(self) -> &'static str {
        match self {
            Self::Friend => "比肩",
            Self::RobWealth => "劫财",
            Self::EatingGod => "食神",
            Self::HurtingOfficer => "伤官",
            Self::IndirectWealth => "偏财",
            Self::DirectWealth => "正财",
            Self::SevenKillings => "七杀",
            Self::DirectOfficer => "正官",
            Self::IndirectResource => "偏印",
            Self::DirectResource => "正印",
        }
    }
}

/// Ten-way relationship of `other` relative to the day master `day_stem`.
pub fn ten_god(day_stem: Stem, other: Stem) -> TenGod {
    let same = day_stem.polarity() == other.polarity();
    match (ten_relationship(day_stem, other), same) {
        (TenRelationship::Peer, true) => TenGod::Friend,
        (TenRelationship::Peer, false) => TenGod::RobWealth,
        (TenRelationship::Output, true) => TenGod::EatingGod,
        (TenRelationship::Output, false) => TenGod::HurtingOfficer,
        (TenRelationship::Wealth, true) => TenGod::IndirectWealth,
        (TenRelationship::Wealth, false) => TenGod::DirectWealth,
        (TenRelationship::Officer, true) => TenGod::SevenKillings,
        (TenRelationship::Officer, false) => TenGod::DirectOfficer,
        (TenRelationship::Resource, true) => TenGod::IndirectResource,
        (TenRelationship::Resource, false) => TenGod::DirectResource,
    }
}
