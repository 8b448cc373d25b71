//! Element and ten-relationship tallies over the four pillars.

use std::collections::BTreeMap;

use crate::element::{ALL_ELEMENTS, Element};
use crate::pillar::FourPillars;
use crate::ten_relationship::{ALL_TEN_RELATIONSHIPS, TenRelationship, ten_relationship};

/// Count elements over the 4 pillar stems and every hidden stem of the 4 branches.
///
/// All five elements are present in the result, zero counts included.
pub fn element_counts(pillars: &FourPillars) -> BTreeMap<Element, u32> {
    let mut counts: BTreeMap<Element, u32> = ALL_ELEMENTS.iter().map(|e| (*e, 0)).collect();
    for p in pillars.as_array() {
        *counts.entry(p.stem.element()).or_insert(0) += 1;
        for h in p.branch.hidden_stems() {
            *counts.entry(h.stem.element()).or_insert(0) += 1;
        }
    }
    counts
}

/// Count ten-relationship categories over every stem except the day master.
///
/// Includes the other three pillar stems and all hidden stems; all five
/// categories are present in the result.
pub fn ten_relationship_strengths(pillars: &FourPillars) -> BTreeMap<TenRelationship, u32> {
    let dm = pillars.day_master();
    let mut counts: BTreeMap<TenRelationship, u32> =
        ALL_TEN_RELATIONSHIPS.iter().map(|r| (*r, 0)).collect();
    let [year, month, day, hour] = pillars.as_array();
    let visible = [year.stem, month.stem, hour.stem];
    let hidden = [year, month, day, hour]
        .into_iter()
        .flat_map(|p| p.branch.hidden_stems().iter().map(|h| h.stem));
    for stem in visible.into_iter().chain(hidden) {
        *counts.entry(ten_relationship(dm, stem)).or_insert(0) += 1;
    }
    counts
}

/// Elements with the lowest count (ties kept, generation-cycle order).
pub fn useful_elements(counts: &BTreeMap<Element, u32>) -> Vec<Element> {
    let min = ALL_ELEMENTS
        .iter()
        .map(|e| counts.get(e).copied().unwrap_or(0))
        .min()
        .unwrap_or(0);
    ALL_ELEMENTS
        .into_iter()
        .filter(|e| counts.get(e).copied().unwrap_or(0) == min)
        .collect()
}
