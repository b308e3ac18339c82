use crate::assessment::{QuestionCatalog, ResponseSet};
use chrono::NaiveDate;

/// Two pillars of two questions each, ten points per pillar.
pub(super) const TWO_BY_TWO: &str = r#"{
    "metadata": {"framework_name": "Pilot Framework", "version": "0.9", "total_questions": 4},
    "scoring_guide": {"interpretation": {
        "0-40": "band 0-40",
        "41-60": "band 41-60",
        "61-80": "band 61-80",
        "81-100": "band 81-100"
    }},
    "ALPHA": {"questions": [
        {"id": "A1", "question": "Alpha one?", "scoring": {"Always": 5, "Often": 3, "Sometimes": 2, "Rarely": 1, "Never": 0}, "rationale": "alpha one matters"},
        {"id": "A2", "question": "Alpha two?", "scoring": {"Always": 5, "Often": 3, "Sometimes": 2, "Rarely": 1, "Never": 0}, "rationale": "alpha two matters"}
    ]},
    "BETA": {"questions": [
        {"id": "B1", "question": "Beta one?", "scoring": {"Always": 5, "Often": 3, "Sometimes": 2, "Rarely": 1, "Never": 0}, "rationale": "beta one matters"},
        {"id": "B2", "question": "Beta two?", "scoring": {"Always": 5, "Often": 3, "Sometimes": 2, "Rarely": 1, "Never": 0}, "rationale": "beta two matters"}
    ]}
}"#;

pub(super) const QUESTION_IDS: [&str; 4] = ["A1", "A2", "B1", "B2"];

pub(super) fn two_by_two() -> QuestionCatalog {
    QuestionCatalog::from_json_str(TWO_BY_TWO).expect("pilot catalog parses")
}

pub(super) fn responses(pairs: &[(&str, &str)]) -> ResponseSet {
    pairs.iter().copied().collect()
}

pub(super) fn report_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 14).expect("valid report date")
}

/// Two yes/partly/no pillars of uneven size: `WIDE` holds 27 questions
/// (`W1..=W27`), `NARROW` holds 17 (`N1..=N17`).
pub(super) fn uneven_pillars() -> QuestionCatalog {
    let pillar = |prefix: &str, count: usize| {
        (1..=count)
            .map(|index| {
                format!(
                    r#"{{"id": "{prefix}{index}", "question": "?", "scoring": {{"Yes": 5, "Partly": 2, "No": 0}}}}"#
                )
            })
            .collect::<Vec<_>>()
            .join(",")
    };
    let json = format!(
        r#"{{
            "metadata": {{"framework_name": "Uneven", "version": "1"}},
            "scoring_guide": {{"interpretation": {{
                "0-40": "a", "41-60": "b", "61-80": "c", "81-100": "d"
            }}}},
            "WIDE": {{"questions": [{}]}},
            "NARROW": {{"questions": [{}]}}
        }}"#,
        pillar("W", 27),
        pillar("N", 17)
    );
    QuestionCatalog::from_json_str(&json).expect("uneven catalog parses")
}

/// 8/135 points in `WIDE` and 5/85 in `NARROW`: both display as 5.9%.
pub(super) fn rounded_tie_answers() -> ResponseSet {
    responses(&[
        ("W1", "Partly"),
        ("W2", "Partly"),
        ("W3", "Partly"),
        ("W4", "Partly"),
        ("N1", "Yes"),
    ])
}
