// Integration tests for the diagnostics pipeline
//
// Each test drives run_diagnostics or the DiagnosticEngine end to end, from
// raw setup text and reported symptoms to the tier-filtered advice.

use trackside::diagnostics::profile::{SurfaceCondition, TemperatureBand, TrackCategory};
use trackside::diagnostics::{DownforceLevel, find_conflicts};
use trackside::{
    AnalysisTier, Category, ConfigurationProfile, DiagnosticEngine, Recommendation, Severity,
    Symptom, SymptomProfile, TrackContext, run_diagnostics,
};

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn symptoms(list: &[Symptom]) -> SymptomProfile {
    SymptomProfile::from_symptoms(list.iter().copied())
}

fn solutions_lowercase(rec: &Recommendation) -> Vec<String> {
    rec.solutions.iter().map(|s| s.to_lowercase()).collect()
}

#[test]
fn test_entry_understeer_on_empty_setup() {
    let recs = run_diagnostics(
        &ConfigurationProfile::default(),
        &symptoms(&[Symptom::EntryUndersteer]),
        &TrackContext::default(),
        AnalysisTier::Premium,
    );

    assert_eq!(recs.len(), 1);
    let rec = &recs[0];
    assert_eq!(rec.problem, "entry understeer");
    assert_eq!(rec.category, Category::Entry);
    assert_eq!(rec.severity, Severity::High);
    assert!(
        solutions_lowercase(rec)
            .iter()
            .any(|s| s.contains("soften front springs"))
    );
    let important = rec.important.as_deref().unwrap_or_default();
    assert!(important.contains("ride height"));
}

#[test]
fn test_high_speed_instability_without_aero() {
    let mut config = ConfigurationProfile::default();
    config.aero.aero_configuration = text("none");

    let recs = run_diagnostics(
        &config,
        &symptoms(&[Symptom::WanderingHighSpeed]),
        &TrackContext::default(),
        AnalysisTier::Basic,
    );

    let rec = recs
        .iter()
        .find(|rec| rec.severity == Severity::Critical)
        .expect("critical recommendation");
    assert!(rec.title.to_lowercase().contains("add a rear wing"));
    assert!(rec.solutions.iter().any(|s| s.contains("8-12°")));
    assert!(
        solutions_lowercase(rec)
            .iter()
            .any(|s| s.contains("medium end plates"))
    );
}

#[test]
fn test_wing_angle_escalation_quotes_current_value() {
    let mut config = ConfigurationProfile::default();
    config.aero.aero_configuration = text("rear-wing");
    config.aero.rear_wing_angle = text("6");

    for tier in AnalysisTier::ALL {
        let recs = run_diagnostics(
            &config,
            &symptoms(&[Symptom::WanderingHighSpeed]),
            &TrackContext::default(),
            tier,
        );
        let solution = recs
            .iter()
            .flat_map(|rec| rec.solutions.iter())
            .find(|s| s.starts_with("Increase rear wing angle"))
            .expect("wing increase");
        assert_eq!(solution, "Increase rear wing angle from 6° to 10-15°");
    }
}

#[test]
fn test_wing_angle_text_is_quoted_verbatim() {
    let mut config = ConfigurationProfile::default();
    config.aero.rear_wing_angle = text(" 6.50 ");

    let recs = run_diagnostics(
        &config,
        &symptoms(&[Symptom::WanderingHighSpeed]),
        &TrackContext::default(),
        AnalysisTier::Basic,
    );
    assert!(
        recs.iter()
            .flat_map(|rec| rec.solutions.iter())
            .any(|s| s.contains("from 6.50°"))
    );
}

#[test]
fn test_conflicting_symptoms_produce_both_directions() {
    let recs = run_diagnostics(
        &ConfigurationProfile::default(),
        &symptoms(&[Symptom::EntryUndersteer, Symptom::ExitOversteer]),
        &TrackContext::default(),
        AnalysisTier::Basic,
    );

    assert!(recs.len() >= 2);
    let all: Vec<String> = recs.iter().flat_map(solutions_lowercase).collect();
    assert!(all.iter().any(|s| s.starts_with("soften front")));
    assert!(all.iter().any(|s| s.starts_with("soften rear")));
}

#[test]
fn test_opposite_advice_is_kept_and_reported() {
    let config = ConfigurationProfile::default();
    let symptoms = symptoms(&[Symptom::EntryUndersteer, Symptom::MidCornerUndersteer]);
    let track = TrackContext::default();

    let recs = run_diagnostics(&config, &symptoms, &track, AnalysisTier::Premium);
    let all: Vec<String> = recs.iter().flat_map(solutions_lowercase).collect();
    assert!(all.contains(&"soften front springs".to_string()));
    assert!(all.contains(&"stiffen front springs".to_string()));

    let conflicts = find_conflicts(&recs);
    assert!(conflicts.iter().any(|c| c.control == "front springs"));
}

#[test]
fn test_basic_tier_truncation() {
    let mut config = ConfigurationProfile::default();
    config.aero.splitter_height = text("4.5");
    config.aero.rear_wing_angle = text("18");
    config.tires.compound = text("slick");
    let symptoms = symptoms(&Symptom::ALL);
    let track = TrackContext {
        category: TrackCategory::RoadCourse,
        surface: SurfaceCondition::Wet,
        temperature: TemperatureBand::Hot,
    };

    let basic = run_diagnostics(&config, &symptoms, &track, AnalysisTier::Basic);
    let premium = run_diagnostics(&config, &symptoms, &track, AnalysisTier::Premium);

    assert!(!basic.is_empty());
    assert!(basic.len() <= premium.len());
    for rec in &basic {
        assert!(rec.caution.is_none());
        assert!(rec.important.is_none());
        assert!(rec.rationale.is_empty());
        assert_eq!(rec.tier, AnalysisTier::Basic);
    }

    // One recommendation per category at the basic tier
    let mut categories: Vec<_> = basic.iter().map(|rec| rec.category).collect();
    categories.dedup();
    assert_eq!(categories.len(), basic.len());

    assert!(premium.iter().any(|rec| rec.rule_id == "slick-compression"));
    assert!(premium.iter().any(|rec| rec.caution.is_some()));
}

#[test]
fn test_neutral_metrics_without_aero_data() {
    let report = DiagnosticEngine::default().report(
        &ConfigurationProfile::default(),
        &SymptomProfile::default(),
        &TrackContext::default(),
    );
    assert_eq!(report.metrics.downforce_level, DownforceLevel::Low);
    assert_eq!(report.metrics.downforce_score, 0.0);
    assert_eq!(report.metrics.aero_balance_percent_front, 50);
    assert!(report.is_clean());
}

#[test]
fn test_garbage_input_never_fails() {
    let mut config = ConfigurationProfile::default();
    config.aero.aero_configuration = text("spaceship");
    config.aero.splitter_height = text("low-ish");
    config.aero.rear_wing_angle = text("∞");
    config.aero.canard_count = text("-3");
    config.aero.end_plate_size = text("huge");
    config.tires.compound = text("");
    config.corner_balance.cross_weight_percent = text("NaN");
    config.suspension.front_spring_rate = text("1e999");

    for tier in AnalysisTier::ALL {
        let recs = run_diagnostics(
            &config,
            &symptoms(&Symptom::ALL),
            &TrackContext::default(),
            tier,
        );
        // Numeric aero rules stay silent, symptom rules still fire
        assert!(recs.iter().all(|rec| !rec.rule_id.starts_with("splitter-")));
        assert!(recs.iter().all(|rec| !rec.rule_id.starts_with("wing-angle-")));
        assert!(recs.iter().any(|rec| rec.category == Category::Entry));
    }
}

#[test]
fn test_output_is_ordered_by_category() {
    let recs = run_diagnostics(
        &ConfigurationProfile::default(),
        &symptoms(&[
            Symptom::OutsideTireWear,
            Symptom::ExitUndersteer,
            Symptom::EntryOversteer,
            Symptom::WanderingHighSpeed,
        ]),
        &TrackContext::default(),
        AnalysisTier::Premium,
    );
    let categories: Vec<_> = recs.iter().map(|rec| rec.category).collect();
    let mut sorted = categories.clone();
    sorted.sort();
    assert_eq!(categories, sorted);
    assert_eq!(categories.first(), Some(&Category::Entry));
    assert_eq!(categories.last(), Some(&Category::Wear));
}

#[test]
fn test_track_type_scales_shock_advice() {
    let mut config = ConfigurationProfile::default();
    config.tires.compound = text("drag radial");
    let track = TrackContext {
        category: TrackCategory::DragStrip,
        ..Default::default()
    };

    let recs = run_diagnostics(&config, &SymptomProfile::default(), &track, AnalysisTier::Premium);
    let rec = recs
        .iter()
        .find(|rec| rec.rule_id == "drag-radial-extension")
        .expect("drag radial advice");
    assert_eq!(rec.solutions[0], "Soften front extension damping by 2 clicks");
}

#[test]
fn test_notes_do_not_affect_output() {
    let config = ConfigurationProfile::default();
    let mut with_notes = symptoms(&[Symptom::ExitUndersteer]);
    let without_notes = with_notes.clone();
    with_notes.notes = "pushes badly in turn 4, fine elsewhere".to_string();

    for tier in AnalysisTier::ALL {
        assert_eq!(
            run_diagnostics(&config, &with_notes, &TrackContext::default(), tier),
            run_diagnostics(&config, &without_notes, &TrackContext::default(), tier)
        );
    }
}

#[test]
fn test_explicit_no_aero_ignores_leftover_wing_angle() {
    let mut config = ConfigurationProfile::default();
    config.aero.aero_configuration = text("none");
    config.aero.rear_wing_angle = text("18");

    let recs = run_diagnostics(
        &config,
        &symptoms(&[Symptom::WanderingHighSpeed]),
        &TrackContext::default(),
        AnalysisTier::Premium,
    );
    assert!(recs.iter().any(|rec| rec.rule_id == "high-speed-add-rear-wing"));
    assert!(
        recs.iter()
            .flat_map(|rec| rec.solutions.iter())
            .all(|s| !s.contains("from 18°"))
    );
}
