use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

const CATALOG: &str = include_str!("../framework/assessment_questions.json");

fn cli() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_equity-framework"));
    for key in [
        "EQUITY_ENV",
        "EQUITY_CATALOG_PATH",
        "EQUITY_GAP_THRESHOLD",
        "EQUITY_GAPS_PER_CATEGORY",
        "EQUITY_ORGANIZATION",
        "EQUITY_LOG_LEVEL",
        "RUST_LOG",
    ] {
        command.env_remove(key);
    }
    command.env("EQUITY_LOG_LEVEL", "warn");
    command
}

fn run(command: &mut Command) -> Output {
    command.output().expect("binary runs")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn demo_prints_sample_report() {
    let output = run(cli().args(["demo", "--date", "2025-11-14"]));
    assert!(output.status.success(), "{output:?}");

    let text = stdout(&output);
    assert!(text.contains("Organization: Sample Health System"));
    assert!(text.contains("Date: November 14, 2025"));
    assert!(text.contains("OVERALL SCORE: 34.0%"));
    assert!(text.contains("PRIORITY FOCUS AREA: TECHNOLOGY"));
}

#[test]
fn score_reads_csv_responses_and_emits_json() {
    let dir = TempDir::new().expect("temp dir");
    let catalog = dir.path().join("catalog.json");
    let responses = dir.path().join("responses.csv");
    fs::write(&catalog, CATALOG).expect("write catalog");
    fs::write(&responses, "id,response\nP1,Yes\nT1,\n").expect("write responses");

    let output = run(cli().args([
        "score",
        "--catalog",
        catalog.to_str().expect("utf-8 path"),
        "--responses",
        responses.to_str().expect("utf-8 path"),
        "--organization",
        "Riverside Health",
        "--date",
        "2025-11-14",
        "--format",
        "json",
    ]));
    assert!(output.status.success(), "{output:?}");

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("json report on stdout");
    assert_eq!(report["header"]["organization"], "Riverside Health");
    assert_eq!(report["scores"]["categories"][2]["points_earned"], 0);
    assert_eq!(report["recommendations"]["closing"]["level"], "CRITICAL");
}

#[test]
fn gaps_lists_every_flagged_question() {
    let dir = TempDir::new().expect("temp dir");
    let catalog = dir.path().join("catalog.json");
    let responses = dir.path().join("responses.json");
    fs::write(&catalog, CATALOG).expect("write catalog");
    fs::write(&responses, include_str!("../framework/sample_responses.json"))
        .expect("write responses");

    let output = run(cli().args([
        "gaps",
        "--catalog",
        catalog.to_str().expect("utf-8 path"),
        "--responses",
        responses.to_str().expect("utf-8 path"),
    ]));
    assert!(output.status.success(), "{output:?}");

    let text = stdout(&output);
    assert!(text.starts_with("45 gaps at or below 2/5 points"));
    assert!(text.contains("[T20]"));
}

#[test]
fn disparity_prints_rates_and_ratios() {
    let dir = TempDir::new().expect("temp dir");
    let deaths = dir.path().join("deaths.tsv");
    let births = dir.path().join("births.tsv");
    fs::write(
        &deaths,
        "Year\tHispanic Origin\tRace\tDeaths\n\
2021\tNot Hispanic or Latino\tBlack or African American\t50\n\
2021\tNot Hispanic or Latino\tWhite\t40\n",
    )
    .expect("write deaths");
    fs::write(
        &births,
        "Year\tHispanic Origin\tRace\tBirths\n\
2021\tNot Hispanic or Latino\tBlack or African American\t50,000\n\
2021\tNot Hispanic or Latino\tWhite\t200,000\n",
    )
    .expect("write births");

    let output = run(cli().args([
        "disparity",
        "--deaths",
        deaths.to_str().expect("utf-8 path"),
        "--births",
        births.to_str().expect("utf-8 path"),
    ]));
    assert!(output.status.success(), "{output:?}");

    let text = stdout(&output);
    assert!(text.contains("- Black (NH): 100.0 (50 deaths / 50000 births)"));
    assert!(text.contains("- Black (NH): 5.00x (400.0% higher)"));
}

#[test]
fn missing_catalog_fails_with_application_error() {
    let dir = TempDir::new().expect("temp dir");
    let responses = dir.path().join("responses.json");
    fs::write(&responses, "{}").expect("write responses");

    let output = run(cli().args([
        "score",
        "--catalog",
        dir.path().join("absent.json").to_str().expect("utf-8 path"),
        "--responses",
        responses.to_str().expect("utf-8 path"),
    ]));

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("application error: catalog error"));
}
