//! Questionnaire scoring: catalog loading, per-question and per-pillar
//! scoring, gap detection and report generation.

mod catalog;
mod gaps;
mod recommendations;
pub mod report;
mod responses;
mod rubric;
mod scoring;

#[cfg(test)]
mod tests;

pub use catalog::{
    CatalogError, CatalogMetadata, Category, Question, QuestionCatalog, ResponseOption,
    MAX_QUESTION_SCORE,
};
pub use gaps::{find_gaps, CategoryGaps, GapRecord, DEFAULT_GAP_THRESHOLD};
pub use recommendations::{actions_for, default_actions, ClosingRecommendation};
pub use report::{
    generate_report, render_narrative, AssessmentReport, ReportOptions, DEFAULT_GAPS_DISPLAYED,
};
pub use responses::{ResponseError, ResponseSet};
pub use rubric::{InterpretationRubric, RubricBand};
pub use scoring::{
    round_one_decimal, score_category, score_overall, score_question, BreakdownEntry,
    CategoryResult, CategoryScore, OverallResult, ScoreCard,
};

use std::sync::Arc;

/// Stateless scorer bound to one immutable catalog. Cloning shares the
/// catalog, so independent runs can proceed side by side.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    catalog: Arc<QuestionCatalog>,
}

impl ScoringEngine {
    pub fn new(catalog: QuestionCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    pub fn shared(catalog: Arc<QuestionCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    /// Scores one category by id; `None` when the catalog has no such category.
    pub fn score_category(&self, category_id: &str, responses: &ResponseSet) -> Option<CategoryScore> {
        self.catalog
            .category(category_id)
            .map(|category| score_category(category, responses))
    }

    pub fn score_overall(&self, responses: &ResponseSet) -> ScoreCard {
        score_overall(&self.catalog, responses)
    }

    pub fn find_gaps(&self, responses: &ResponseSet, threshold: u8) -> Vec<CategoryGaps> {
        find_gaps(&self.catalog, responses, threshold)
    }

    pub fn generate_report(
        &self,
        responses: &ResponseSet,
        options: &ReportOptions,
    ) -> AssessmentReport {
        generate_report(&self.catalog, responses, options)
    }
}
