//! Golden charts through the full engine pipeline.

use std::sync::Arc;

use bazi_base::{Element, LuckDirection, Sex, SolarTerm, TenGod, TenRelationship};
use bazi_search::{
    AnswerCard, AnswerCardSource, BaziEngine, BirthInput, BirthTime, CardTopic, ChartReport,
    EngineConfig, GeoPoint,
};

fn engine() -> BaziEngine {
    BaziEngine::new(EngineConfig::default()).unwrap()
}

fn millennium() -> ChartReport {
    let input = BirthInput::new(2000, 1, 1, BirthTime::hm(12, 0), Sex::Male);
    engine().compute(&input).unwrap()
}

fn summer_1990() -> ChartReport {
    let input = BirthInput::new(1990, 6, 15, BirthTime::hm(10, 30), Sex::Female);
    engine().compute(&input).unwrap()
}

// ---------------------------------------------------------------------------
// Pillars
// ---------------------------------------------------------------------------

#[test]
fn millennium_pillars() {
    let r = millennium();
    let p = r.pillars();
    assert_eq!(p.year.name(), "Ji-Mao");
    assert_eq!(p.month.name(), "Bing-Zi");
    assert_eq!(p.day.name(), "Wu-Wu");
    assert_eq!(p.hour.name(), "Wu-Wu");
    assert_eq!(p.year.hanzi(), "己卯");
    // five days before Xiaohan
    assert!(p.month.confidence() > 0.65 && p.month.confidence() < 0.75);
    assert_eq!(p.year.confidence(), 1.0);
    assert_eq!(p.hour.confidence(), 1.0);
    assert!(!r.boundary_alert.is_alert());
    assert!(r.candidates.is_empty());
}

#[test]
fn summer_1990_pillars() {
    let r = summer_1990();
    let p = r.pillars();
    assert_eq!(p.year.name(), "Geng-Wu");
    assert_eq!(p.month.name(), "Ren-Wu");
    assert_eq!(p.day.name(), "Xin-Hai");
    assert_eq!(p.hour.name(), "Gui-Si");
}

#[test]
fn civil_month_is_diagnostic_only() {
    let r = summer_1990();
    assert_eq!(r.diagnostics.civil_month_pillar.name(), "Xin-Si");
    assert!(!r.diagnostics.month_sources_agree);
    assert_eq!(r.diagnostics.term_month.month, 5);
    assert_eq!(r.diagnostics.term_month.started.term, SolarTerm::Mangzhong);
    assert_eq!(r.diagnostics.term_month.next.term, SolarTerm::Xiaoshu);
}

#[test]
fn solar_time_moves_hour_clock() {
    let input = BirthInput::new(1990, 6, 15, BirthTime::hm(10, 30), Sex::Female)
        .with_geo(GeoPoint::new(39.9, 116.4))
        .with_place("Beijing");
    let r = engine().compute(&input).unwrap();
    assert!((r.diagnostics.solar_time_offset_minutes + 14.4).abs() < 1e-9);
    assert_eq!((r.normalized_instant.hour, r.normalized_instant.minute), (10, 15));
    assert_eq!(r.pillars().hour.name(), "Gui-Si");
}

#[test]
fn solar_time_correction_can_be_disabled() {
    let mut config = EngineConfig::default();
    config.solar_time_correction = false;
    let input = BirthInput::new(1990, 6, 15, BirthTime::hm(10, 30), Sex::Female)
        .with_geo(GeoPoint::new(39.9, 116.4));
    let r = BaziEngine::new(config).unwrap().compute(&input).unwrap();
    assert_eq!(r.diagnostics.solar_time_offset_minutes, 0.0);
    assert_eq!(r.normalized_instant.minute, 30);
}

#[test]
fn unknown_time_uses_placeholder_hour() {
    let input = BirthInput::new(2000, 1, 1, BirthTime::Unknown, Sex::Male);
    let r = engine().compute(&input).unwrap();
    assert!(!r.hour_known);
    assert_eq!(r.pillars().hour.name(), "Wu-Wu");
    assert_eq!(r.pillars().hour.confidence(), 0.0);
    assert!(
        r.answer_cards
            .iter()
            .any(|c| c.topic == CardTopic::UnknownBirthTime)
    );
}

// ---------------------------------------------------------------------------
// Tallies
// ---------------------------------------------------------------------------

#[test]
fn millennium_tallies() {
    let r = millennium();
    let counts = &r.chart.element_counts;
    assert_eq!(counts[&Element::Earth], 5);
    assert_eq!(counts[&Element::Fire], 3);
    assert_eq!(counts[&Element::Wood], 1);
    assert_eq!(counts[&Element::Water], 1);
    assert_eq!(counts[&Element::Metal], 0);
    assert_eq!(r.chart.useful_elements, vec![Element::Metal]);

    let s = &r.chart.ten_relationship_strengths;
    assert_eq!(s[&TenRelationship::Peer], 4);
    assert_eq!(s[&TenRelationship::Resource], 3);
    assert_eq!(s[&TenRelationship::Officer], 1);
    assert_eq!(s[&TenRelationship::Wealth], 1);
    assert_eq!(s[&TenRelationship::Output], 0);
    assert_eq!(r.chart.dominant_relationship(), Some(TenRelationship::Peer));
}

#[test]
fn millennium_day_master_and_gods() {
    let r = millennium();
    assert_eq!(r.day_master.element, Element::Earth);
    assert_eq!(r.stem_gods.year, TenGod::RobWealth);
    assert_eq!(r.stem_gods.month, TenGod::IndirectResource);
    assert_eq!(r.stem_gods.hour, TenGod::Friend);
}

#[test]
fn summer_1990_lacks_wood() {
    let r = summer_1990();
    let total: u32 = r.chart.element_counts.values().sum();
    assert_eq!(total, 13);
    assert_eq!(r.chart.useful_elements, vec![Element::Wood]);
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

#[test]
fn millennium_timeline() {
    let r = millennium();
    let tl = &r.timeline;
    assert_eq!(tl.direction, LuckDirection::Reverse);
    assert!((tl.start_age_years - 8.2).abs() < 0.05);
    assert_eq!(tl.luck_pillars[0].pillar.name(), "Yi-Hai");
    assert_eq!(tl.annual_pillars[0].year, 2000);
    assert_eq!(tl.annual_pillars[0].pillar.name(), "Geng-Chen");
    assert_eq!(tl.monthly_pillars.len(), 12);
    assert_eq!(tl.monthly_pillars[0].year, 1999);
    assert_eq!(tl.monthly_pillars[0].term, SolarTerm::Lichun);
    assert_eq!(tl.monthly_pillars[10].pillar.name(), "Bing-Zi");
}

#[test]
fn summer_1990_luck_counts_back_to_mangzhong() {
    let r = summer_1990();
    assert_eq!(r.timeline.direction, LuckDirection::Reverse);
    // about 9.16 days since Mangzhong
    assert!((r.timeline.start_age_years - 3.05).abs() < 0.05);
    assert_eq!(r.timeline.luck_pillars[0].pillar.name(), "Xin-Si");
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

#[test]
fn report_json_shape() {
    let v = serde_json::to_value(millennium()).unwrap();
    for key in [
        "pillars",
        "elementCounts",
        "tenRelationshipStrengths",
        "usefulElements",
        "dayMaster",
        "stemGods",
        "hourKnown",
        "normalizedInstant",
        "boundaryAlert",
        "timeline",
        "answerCards",
        "diagnostics",
    ] {
        assert!(v.get(key).is_some(), "missing {key}");
    }
    assert!(v.get("candidates").is_none());
    assert_eq!(v["pillars"]["day"]["name"], "Wu-Wu");
    assert_eq!(v["pillars"]["day"]["stem"], "wu");
    assert!(v["pillars"]["day"].get("confidence").is_none());
    assert!(v["pillars"]["month"]["confidence"].is_number());
    assert_eq!(v["normalizedInstant"], "2000-01-01T12:00:00");
    assert_eq!(v["elementCounts"]["metal"], 0);
    assert_eq!(v["usefulElements"][0], "metal");
    assert_eq!(v["stemGods"]["year"], "robWealth");
    assert_eq!(v["boundaryAlert"]["hasMonthBoundary"], false);
    assert_eq!(v["diagnostics"]["termModel"], "solar_longitude");
    assert_eq!(v["timeline"]["direction"], "reverse");
}

#[test]
fn candidates_serialize_with_chart_inline() {
    let input = BirthInput::new(2024, 2, 4, BirthTime::hm(16, 0), Sex::Male);
    let v = serde_json::to_value(engine().compute(&input).unwrap()).unwrap();
    let c = &v["candidates"][0];
    assert_eq!(c["pillars"]["year"]["name"], "Jia-Chen");
    assert_eq!(c["reason"], "month");
    assert_eq!(c["changed"][0], "year");
    assert!(c["likelihood"].is_number());
}

// ---------------------------------------------------------------------------
// Answer cards
// ---------------------------------------------------------------------------

#[test]
fn template_cards_cover_chart() {
    let r = millennium();
    let topics: Vec<CardTopic> = r.answer_cards.iter().map(|c| c.topic).collect();
    assert!(topics.contains(&CardTopic::DayMaster));
    assert!(topics.contains(&CardTopic::ElementBalance));
    assert!(topics.contains(&CardTopic::UsefulElements));
    assert!(topics.contains(&CardTopic::LuckCycle));
    assert!(!topics.contains(&CardTopic::BoundaryNotice));
    let dm = &r.answer_cards[0];
    assert_eq!(dm.template, "day_master.wu");
    assert_eq!(dm.slots["element"], "earth");
}

#[test]
fn cards_can_be_disabled() {
    let mut config = EngineConfig::default();
    config.include_answer_cards = false;
    let input = BirthInput::new(2000, 1, 1, BirthTime::hm(12, 0), Sex::Male);
    let r = BaziEngine::new(config).unwrap().compute(&input).unwrap();
    assert!(r.answer_cards.is_empty());
}

struct DayMasterOnly;

impl AnswerCardSource for DayMasterOnly {
    fn cards(&self, report: &ChartReport) -> Vec<AnswerCard> {
        vec![AnswerCard::new(CardTopic::DayMaster, "custom").slot("stem", report.day_master.stem)]
    }
}

#[test]
fn custom_card_source() {
    let engine = engine().with_card_source(Arc::new(DayMasterOnly));
    let input = BirthInput::new(2000, 1, 1, BirthTime::hm(12, 0), Sex::Male);
    let r = engine.compute(&input).unwrap();
    assert_eq!(r.answer_cards.len(), 1);
    assert_eq!(r.answer_cards[0].template, "custom");
    assert_eq!(r.answer_cards[0].slots["stem"], "Wu");
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn out_of_range_year_is_unresolved() {
    let input = BirthInput::new(1700, 6, 1, BirthTime::hm(12, 0), Sex::Male);
    assert!(engine().compute(&input).is_err());
}

#[test]
fn earliest_supported_january_resolves() {
    for day in [8, 20] {
        let input = BirthInput::new(1800, 1, day, BirthTime::hm(12, 0), Sex::Male);
        let r = engine().compute(&input).unwrap();
        assert_eq!(r.diagnostics.term_month.term_year, 1799);
        assert_eq!(r.diagnostics.term_month.month, 12);
        assert_eq!(r.pillars().year.name(), "Ji-Wei");
        assert_eq!(r.timeline.monthly_pillars.len(), 12);
        assert!(r.timeline.monthly_pillars.iter().all(|m| m.year == 1800));
    }
}

#[test]
fn bad_geo_is_rejected() {
    let input = BirthInput::new(2000, 1, 1, BirthTime::hm(12, 0), Sex::Male)
        .with_geo(GeoPoint::new(95.0, 0.0));
    assert!(engine().compute(&input).is_err());
}
