//! Boundary-sensitivity integration tests through the engine.

use bazi_base::{Branch, PillarPosition, Sex, SolarTerm};
use bazi_search::{
    BaziEngine, BirthInput, BirthTime, BoundaryKind, EngineConfig, SolarTermCalculator,
    SolarTermConfig,
};
use bazi_time::{CivilDateTime, MINUTES_PER_DAY};

fn engine() -> BaziEngine {
    BaziEngine::new(EngineConfig::default()).unwrap()
}

fn input_at(t: CivilDateTime) -> BirthInput {
    BirthInput::new(
        t.year,
        t.month,
        t.day,
        BirthTime::Known {
            hour: t.hour,
            minute: t.minute,
            second: t.second,
        },
        Sex::Male,
    )
}

#[test]
fn birth_on_major_term_offers_other_month() {
    let calc = SolarTermCalculator::new(SolarTermConfig::default());
    let mangzhong = calc.boundary(1990, SolarTerm::Mangzhong).unwrap();
    let report = engine().compute(&input_at(mangzhong.local)).unwrap();

    assert!(report.boundary_alert.has_month_boundary);
    assert!(!report.boundary_alert.has_year_boundary);
    assert!(report.boundary_alert.confidence <= 0.7);
    let primary_month = report.pillars().month;
    let alt = report
        .candidates
        .iter()
        .find(|c| c.reason == BoundaryKind::Month)
        .expect("month candidate");
    assert!(!alt.chart.pillars.month.same_ganzhi(&primary_month));
    assert_eq!(alt.changed, vec![PillarPosition::Month]);
}

#[test]
fn standalone_check_lists_candidates() {
    let e = engine();
    let mangzhong = e.calculator().boundary(1990, SolarTerm::Mangzhong).unwrap();
    let input = input_at(mangzhong.local);

    let check = e.check_boundaries(&input).unwrap();
    assert!(check.has_month_boundary);
    let alt = check
        .candidates
        .iter()
        .find(|c| c.reason == BoundaryKind::Month)
        .expect("month candidate");
    assert_eq!(alt.changed, vec![PillarPosition::Month]);

    let report = e.compute(&input).unwrap();
    assert_eq!(check.candidates, report.candidates);
    assert!(report.boundary_alert.candidates.is_empty());
}

#[test]
fn standalone_check_on_lichun_eve_serializes_candidates() {
    let check = engine()
        .check_boundaries(&input_at(CivilDateTime::new(2024, 2, 4, 16, 0, 0.0)))
        .unwrap();
    assert!(check.has_year_boundary);
    let v = serde_json::to_value(&check).unwrap();
    assert_eq!(v["candidates"][0]["pillars"]["year"]["name"], "Jia-Chen");
    assert_eq!(v["candidates"][0]["reason"], "month");
    assert_eq!(v["triggers"][0]["term"], "lichun");

    let quiet = engine()
        .check_boundaries(&input_at(CivilDateTime::new(2010, 7, 22, 12, 0, 0.0)))
        .unwrap();
    assert!(quiet.candidates.is_empty());
    assert!(serde_json::to_value(&quiet).unwrap().get("candidates").is_none());
}

#[test]
fn term_before_supported_window_is_skipped() {
    // Xiaohan 1800 opens the month two or three days earlier; the month
    // before it lies in 1799, outside the default window
    let input = input_at(CivilDateTime::new(1800, 1, 8, 12, 0, 0.0));
    let check = engine().check_boundaries(&input).unwrap();
    assert!(check.has_month_boundary);
    assert!(check.candidates.is_empty());
}

#[test]
fn lichun_eve_offers_next_year() {
    // Lichun 2024 is about 16:21 at UTC+8
    let report = engine()
        .compute(&input_at(CivilDateTime::new(2024, 2, 4, 16, 0, 0.0)))
        .unwrap();
    let p = report.pillars();
    assert_eq!(p.year.name(), "Gui-Mao");
    assert_eq!(p.month.name(), "Yi-Chou");
    assert!(report.boundary_alert.has_month_boundary);
    assert!(report.boundary_alert.has_year_boundary);
    assert!((p.year.confidence() - 0.7).abs() < 1e-12);
    assert!((p.month.confidence() - 0.5).abs() < 1e-12);

    assert_eq!(report.candidates.len(), 1);
    let alt = &report.candidates[0];
    assert_eq!(alt.chart.pillars.year.name(), "Jia-Chen");
    assert_eq!(alt.chart.pillars.month.name(), "Bing-Yin");
    assert_eq!(alt.changed, vec![PillarPosition::Year, PillarPosition::Month]);
    assert!(alt.chart.pillars.day.same_ganzhi(&p.day));
    assert!(alt.distance_minutes < 0.0);
}

#[test]
fn near_odd_hour_offers_next_branch() {
    let report = engine()
        .compute(&input_at(CivilDateTime::new(1990, 6, 15, 10, 57, 0.0)))
        .unwrap();
    let p = report.pillars();
    assert_eq!(p.hour.branch, Branch::Si);
    assert!(report.boundary_alert.has_hour_boundary);
    assert!((p.hour.confidence() - 0.5).abs() < 1e-12);
    let alt = &report.candidates[0];
    assert_eq!(alt.reason, BoundaryKind::Hour);
    assert_eq!(alt.chart.pillars.hour.branch, Branch::Wu);
    assert_eq!(alt.changed, vec![PillarPosition::Hour]);
}

#[test]
fn late_zi_hour_with_rollover_flags_day() {
    let mut config = EngineConfig::default();
    config.zi_hour_next_day = true;
    let engine = BaziEngine::new(config).unwrap();
    let report = engine
        .compute(&input_at(CivilDateTime::new(1990, 6, 15, 23, 4, 0.0)))
        .unwrap();
    let alt = report
        .candidates
        .iter()
        .find(|c| c.reason == BoundaryKind::Hour)
        .expect("hour candidate");
    assert_eq!(alt.changed, vec![PillarPosition::Day, PillarPosition::Hour]);
    assert!(report.pillars().day.confidence() < 1.0);
}

#[test]
fn unknown_time_has_no_hour_alert() {
    let input = BirthInput::new(1990, 6, 15, BirthTime::Unknown, Sex::Female);
    let report = engine().compute(&input).unwrap();
    let p = report.pillars();
    assert!(p.hour.confidence() <= 0.5);
    assert_eq!(p.year.confidence(), 1.0);
    assert_eq!(p.month.confidence(), 1.0);
    assert_eq!(p.day.confidence(), 1.0);
    assert!(!report.boundary_alert.has_hour_boundary);
    assert!(!report.hour_known);
}

#[test]
fn confidence_never_rises_toward_boundary() {
    let e = engine();
    let calc = e.calculator();
    let liqiu = calc.boundary(2010, SolarTerm::Liqiu).unwrap();
    let mut prev_alert = 1.0_f64;
    let mut prev_month = 1.0_f64;
    // from nine days before the term up to the term, in 90-minute steps
    let mut minutes = -9.0 * MINUTES_PER_DAY;
    while minutes <= 0.0 {
        let t = liqiu.local.add_minutes(minutes);
        // stay clear of odd-hour branch changes so only term proximity matters
        let t = CivilDateTime::new(t.year, t.month, t.day, t.hour, 0, 0.0);
        let input = if t.hour % 2 == 0 {
            input_at(t)
        } else {
            input_at(t.add_minutes(-60.0))
        };
        let report = e.compute(&input).unwrap();
        let alert = report.boundary_alert.confidence;
        let month = report.pillars().month.confidence();
        assert!(alert <= prev_alert + 1e-12, "alert rose at {minutes}");
        assert!(month <= prev_month + 1e-12, "month rose at {minutes}");
        prev_alert = alert;
        prev_month = month;
        minutes += 90.0;
    }
}

#[test]
fn far_from_boundaries_is_fully_confident() {
    let report = engine()
        .compute(&input_at(CivilDateTime::new(2010, 7, 22, 12, 0, 0.0)))
        .unwrap();
    assert!(!report.boundary_alert.is_alert());
    assert_eq!(report.boundary_alert.confidence, 1.0);
    assert!(report.candidates.is_empty());
    assert_eq!(report.pillars().month.confidence(), 1.0);
}
