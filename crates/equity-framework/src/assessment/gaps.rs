use super::catalog::{QuestionCatalog, MAX_QUESTION_SCORE};
use super::responses::ResponseSet;
use super::scoring::score_question;
use serde::Serialize;
use tracing::debug;

/// Scores at or below this value are flagged unless a run overrides it.
pub const DEFAULT_GAP_THRESHOLD: u8 = 2;

/// Snapshot of an answered question that scored at or below the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GapRecord {
    pub id: String,
    pub question: String,
    pub response: String,
    pub score: u8,
    pub max_score: u8,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGaps {
    pub category: String,
    pub gaps: Vec<GapRecord>,
}

/// Flags answered questions scoring at or below `threshold`, per category
/// and in catalog question order. Unanswered questions are never flagged even
/// though they score zero toward their category.
pub fn find_gaps(
    catalog: &QuestionCatalog,
    responses: &ResponseSet,
    threshold: u8,
) -> Vec<CategoryGaps> {
    catalog
        .categories()
        .iter()
        .map(|category| {
            let gaps: Vec<GapRecord> = category
                .questions
                .iter()
                .filter_map(|question| {
                    let response = responses.get(&question.id)?;
                    let score = score_question(question, Some(response));
                    (score <= threshold).then(|| GapRecord {
                        id: question.id.clone(),
                        question: question.prompt.clone(),
                        response: response.to_string(),
                        score,
                        max_score: MAX_QUESTION_SCORE,
                        rationale: question.rationale.clone(),
                    })
                })
                .collect();

            debug!(category = %category.id, gaps = gaps.len(), threshold, "identified gaps");

            CategoryGaps {
                category: category.id.clone(),
                gaps,
            }
        })
        .collect()
}
