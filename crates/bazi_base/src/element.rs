//! The five elements and their cycles.
//!
//! Generation (production) runs Wood → Fire → Earth → Metal → Water → Wood.
//! Domination skips one step: Wood → Earth → Water → Fire → Metal → Wood.

use serde::Serialize;

/// One of the five elements (wuxing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

/// All 5 elements in generation-cycle order (index 0 = Wood).
pub const ALL_ELEMENTS: [Element; 5] = [
    Element::Wood,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Water,
];

impl Element {
    /// 0-based position in the generation cycle.
    pub const fn index(self) -> u8 {
        match self {
            Self::Wood => 0,
            Self::Fire => 1,
            Self::Earth => 2,
            Self::Metal => 3,
            Self::Water => 4,
        }
    }

    /// English name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wood => "wood",
            Self::Fire => "fire",
            Self::Earth => "earth",
            Self::Metal => "metal",
            Self::Water => "water",
        }
    }

    pub const fn hanzi(self) -> &'static str {
        match self {
            Self::Wood => "木",
            Self::Fire => "火",
            Self::Earth => "土",
            Self::Metal => "金",
            Self::Water => "水",
        }
    }

    /// Element this one produces.
    pub const fn generates(self) -> Element {
        ALL_ELEMENTS[(self.index() as usize + 1) % 5]
    }

    /// Element that produces this one.
    pub const fn generated_by(self) -> Element {
        ALL_ELEMENTS[(self.index() as usize + 4) % 5]
    }

    /// Element this one dominates.
    pub const fn controls(self) -> Element {
        ALL_ELEMENTS[(self.index() as usize + 2) % 5]
    }

    /// Element that dominates this one.
    pub const fn controlled_by(self) -> Element {
        ALL_ELEMENTS[(self.index() as usize + 3) % 5]
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// True when `a` produces `b` in the generation cycle.
pub fn generates(a: Element, b: Element) -> bool {
    a.generates() == b
}
