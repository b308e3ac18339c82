use super::common::*;
use crate::assessment::{render_narrative, ReportOptions, RubricBand, ScoringEngine};

fn options() -> ReportOptions {
    ReportOptions::new("Riverside Health", report_date())
}

#[test]
fn report_header_carries_organization_and_framework() {
    let engine = ScoringEngine::new(two_by_two());
    let report = engine.generate_report(&responses(&[]), &options());

    assert_eq!(report.header.organization, "Riverside Health");
    assert_eq!(report.header.assessment_date, report_date());
    assert_eq!(report.header.framework_name, "Pilot Framework");
    assert_eq!(report.header.framework_version, "0.9");
}

#[test]
fn recommendations_target_lowest_pillar_and_overall_band() {
    let engine = ScoringEngine::new(two_by_two());
    let answers = responses(&[
        ("A1", "Always"),
        ("A2", "Always"),
        ("B1", "Never"),
        ("B2", "Never"),
    ]);

    let report = engine.generate_report(&answers, &options());
    let focus = report
        .recommendations
        .focus
        .as_ref()
        .expect("focus selected");

    assert_eq!(focus.category, "BETA");
    assert_eq!(focus.percentage, 0.0);
    assert!(focus.actions.is_empty(), "no built-in actions for BETA");
    assert_eq!(report.recommendations.closing.band, RubricBand::Moderate);
    assert_eq!(report.recommendations.closing.level, "MODERATE");
}

#[test]
fn focus_follows_displayed_percentage_on_rounded_ties() {
    let engine = ScoringEngine::new(uneven_pillars());
    let report = engine.generate_report(&rounded_tie_answers(), &options());

    let focus = report
        .recommendations
        .focus
        .as_ref()
        .expect("focus selected");
    assert_eq!(focus.category, "WIDE");
    assert_eq!(focus.percentage, 5.9);
    assert!(render_narrative(&report).contains("PRIORITY FOCUS AREA: WIDE"));
}

#[test]
fn gap_section_keeps_full_list_but_displays_limit() {
    let engine = ScoringEngine::new(two_by_two());
    let answers = responses(&[
        ("A1", "Never"),
        ("A2", "Rarely"),
        ("B1", "Never"),
    ]);

    let report = engine.generate_report(&answers, &options().with_gaps_displayed(1));

    assert_eq!(report.gaps.total(), 3);
    assert_eq!(report.gaps.categories[0].gaps.len(), 2);
    let displayed: Vec<_> = report
        .gaps
        .displayed()
        .map(|(entry, shown)| (entry.category.as_str(), shown.len()))
        .collect();
    assert_eq!(displayed, vec![("ALPHA", 1), ("BETA", 1)]);
}

#[test]
fn narrative_renders_scores_gaps_and_guidance() {
    let engine = ScoringEngine::new(two_by_two());
    let answers = responses(&[
        ("A1", "Never"),
        ("A2", "Rarely"),
        ("B1", "Always"),
        ("B2", "Often"),
    ]);

    let report = engine.generate_report(&answers, &options().with_gaps_displayed(1));
    let text = render_narrative(&report);

    assert!(text.contains("PILOT FRAMEWORK ASSESSMENT REPORT"));
    assert!(text.contains("Organization: Riverside Health"));
    assert!(text.contains("Date: November 14, 2025"));
    assert!(text.contains("Score: 1/10 (10.0%)"));
    assert!(text.contains("Score: 8/10 (80.0%)"));
    assert!(text.contains("OVERALL SCORE: 45.0%"));
    assert!(text.contains("INTERPRETATION: band 41-60"));
    assert!(text.contains("ALPHA (2 gaps):"));
    assert!(text.contains("Current: Never (0/5 points)"));
    assert!(text.contains("... and 1 more"));
    assert!(!text.contains("Alpha two?"));
    assert!(text.contains("PRIORITY FOCUS AREA: ALPHA"));
    assert!(text.contains("MODERATE: Infrastructure exists but significant improvement needed."));
}

#[test]
fn serialized_report_exposes_rounded_values_only() {
    let engine = ScoringEngine::new(two_by_two());
    let answers = responses(&[("A1", "Often")]);

    let report = engine.generate_report(&answers, &options());
    let json = serde_json::to_value(&report).expect("report serializes");

    assert_eq!(json["scores"]["categories"][0]["percentage"], 30.0);
    assert_eq!(json["scores"]["overall"]["percentage"], 15.0);
    assert_eq!(json["scores"]["overall"]["band"], "critical");
    assert!(json["scores"]["categories"][0]
        .get("exact_percentage")
        .is_none());
    assert_eq!(json["header"]["assessment_date"], "2025-11-14");
}
