use super::super::gaps::{CategoryGaps, GapRecord};
use super::super::recommendations::ClosingRecommendation;
use super::super::scoring::ScoreCard;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportHeader {
    pub organization: String,
    pub assessment_date: NaiveDate,
    pub framework_name: String,
    pub framework_version: String,
}

/// Complete gap listing plus the per-category display limit applied when
/// the report is rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapSection {
    pub threshold: u8,
    pub display_limit: usize,
    pub categories: Vec<CategoryGaps>,
}

impl GapSection {
    pub fn total(&self) -> usize {
        self.categories.iter().map(|entry| entry.gaps.len()).sum()
    }

    /// Categories with at least one gap, each truncated to the display limit.
    pub fn displayed(&self) -> impl Iterator<Item = (&CategoryGaps, &[GapRecord])> {
        let limit = self.display_limit;
        self.categories
            .iter()
            .filter(|entry| !entry.gaps.is_empty())
            .map(move |entry| {
                let shown = entry.gaps.len().min(limit);
                (entry, &entry.gaps[..shown])
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FocusArea {
    pub category: String,
    /// Rounded to one decimal place.
    pub percentage: f64,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<FocusArea>,
    pub closing: ClosingRecommendation,
}

/// Structured result of a scoring run, ready for rendering or serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentReport {
    pub header: ReportHeader,
    pub scores: ScoreCard,
    pub gaps: GapSection,
    pub recommendations: RecommendationBlock,
}
