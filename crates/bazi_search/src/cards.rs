//! Templated answer cards.
//!
//! Cards carry a template key and the slot values to fill it with; turning
//! them into prose is left to the caller. [`AnswerCardSource`] is the seam
//! for plugging in another interpreter.

use std::collections::BTreeMap;

use bazi_base::LuckDirection;
use serde::Serialize;

use crate::chart_types::ChartReport;

/// What a card talks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CardTopic {
    DayMaster,
    ElementBalance,
    UsefulElements,
    DominantRelationship,
    LuckCycle,
    BoundaryNotice,
    UnknownBirthTime,
}

/// A template key plus its slot values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerCard {
    pub topic: CardTopic,
    pub template: String,
    pub slots: BTreeMap<String, String>,
}

impl AnswerCard {
    pub fn new(topic: CardTopic, template: impl Into<String>) -> Self {
        Self {
            topic,
            template: template.into(),
            slots: BTreeMap::new(),
        }
    }

    pub fn slot(mut self, key: &str, value: impl ToString) -> Self {
        self.slots.insert(key.to_string(), value.to_string());
        self
    }
}

/// Produces answer cards for an assembled chart.
pub trait AnswerCardSource: Send + Sync {
    fn cards(&self, report: &ChartReport) -> Vec<AnswerCard>;
}

/// Built-in card set keyed by day master, balance and luck.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateCards;

impl AnswerCardSource for TemplateCards {
    fn cards(&self, report: &ChartReport) -> Vec<AnswerCard> {
        let chart = &report.chart;
        let dm = report.day_master;
        let mut cards = Vec::with_capacity(7);

        cards.push(
            AnswerCard::new(
                CardTopic::DayMaster,
                format!("day_master.{}", dm.stem.name().to_ascii_lowercase()),
            )
            .slot("stem", dm.stem)
            .slot("element", dm.element)
            .slot("hanzi", dm.stem.hanzi()),
        );

        let mut balance = AnswerCard::new(CardTopic::ElementBalance, "element_balance");
        for (element, count) in &chart.element_counts {
            balance = balance.slot(element.name(), count);
        }
        cards.push(balance);

        let useful: Vec<&str> = chart.useful_elements.iter().map(|e| e.name()).collect();
        cards.push(
            AnswerCard::new(
                CardTopic::UsefulElements,
                format!("useful_elements.{}", useful.len().min(2)),
            )
            .slot("elements", useful.join(",")),
        );

        if let Some(rel) = chart.dominant_relationship() {
            let strength = chart
                .ten_relationship_strengths
                .get(&rel)
                .copied()
                .unwrap_or(0);
            cards.push(
                AnswerCard::new(
                    CardTopic::DominantRelationship,
                    format!("dominant_relationship.{}", rel.name()),
                )
                .slot("relationship", rel.name())
                .slot("strength", strength),
            );
        }

        if let Some(first) = report.timeline.luck_pillars.first() {
            let direction = match report.timeline.direction {
                LuckDirection::Forward => "forward",
                LuckDirection::Reverse => "reverse",
            };
            cards.push(
                AnswerCard::new(CardTopic::LuckCycle, format!("luck_cycle.{direction}"))
                    .slot("start_age", format!("{:.1}", first.start_age))
                    .slot("first_pillar", first.pillar.name())
                    .slot("span_years", first.end_age - first.start_age),
            );
        }

        if report.boundary_alert.is_alert() {
            cards.push(
                AnswerCard::new(CardTopic::BoundaryNotice, "boundary_notice")
                    .slot("candidates", report.candidates.len())
                    .slot("confidence", format!("{:.2}", report.boundary_alert.confidence)),
            );
        }

        if !report.hour_known {
            cards.push(AnswerCard::new(CardTopic::UnknownBirthTime, "unknown_birth_time"));
        }

        cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_strings() {
        let card = AnswerCard::new(CardTopic::ElementBalance, "element_balance")
            .slot("wood", 2)
            .slot("fire", "3");
        assert_eq!(card.slots["wood"], "2");
        assert_eq!(card.slots["fire"], "3");
    }

    #[test]
    fn topic_serializes_camel_case() {
        let v = serde_json::to_value(CardTopic::UnknownBirthTime).unwrap();
        assert_eq!(v, "unknownBirthTime");
    }
}
