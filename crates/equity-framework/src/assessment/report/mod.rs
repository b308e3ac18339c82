mod insights;
mod narrative;
pub mod views;

pub use narrative::{render_narrative, Narrative};
pub use views::{AssessmentReport, FocusArea, GapSection, RecommendationBlock, ReportHeader};

use super::catalog::QuestionCatalog;
use super::gaps::{find_gaps, DEFAULT_GAP_THRESHOLD};
use super::responses::ResponseSet;
use super::scoring::score_overall;
use chrono::{Local, NaiveDate};
use tracing::info;

pub const DEFAULT_GAPS_DISPLAYED: usize = 5;

/// Per-run inputs that shape the report but not the scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    pub organization: String,
    pub assessment_date: NaiveDate,
    pub gap_threshold: u8,
    pub gaps_displayed_per_category: usize,
}

impl ReportOptions {
    pub fn new(organization: impl Into<String>, assessment_date: NaiveDate) -> Self {
        Self {
            organization: organization.into(),
            assessment_date,
            gap_threshold: DEFAULT_GAP_THRESHOLD,
            gaps_displayed_per_category: DEFAULT_GAPS_DISPLAYED,
        }
    }

    pub fn with_gap_threshold(mut self, threshold: u8) -> Self {
        self.gap_threshold = threshold;
        self
    }

    pub fn with_gaps_displayed(mut self, limit: usize) -> Self {
        self.gaps_displayed_per_category = limit;
        self
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::new("Organization", Local::now().date_naive())
    }
}

pub fn generate_report(
    catalog: &QuestionCatalog,
    responses: &ResponseSet,
    options: &ReportOptions,
) -> AssessmentReport {
    let scores = score_overall(catalog, responses);
    let gaps = GapSection {
        threshold: options.gap_threshold,
        display_limit: options.gaps_displayed_per_category,
        categories: find_gaps(catalog, responses, options.gap_threshold),
    };
    let recommendations = insights::build_recommendations(catalog, &scores);

    info!(
        organization = %options.organization,
        overall = scores.overall.percentage,
        band = scores.overall.band.label(),
        gaps = gaps.total(),
        focus = recommendations
            .focus
            .as_ref()
            .map(|focus| focus.category.as_str())
            .unwrap_or("none"),
        "generated assessment report"
    );

    let metadata = catalog.metadata();
    AssessmentReport {
        header: ReportHeader {
            organization: options.organization.clone(),
            assessment_date: options.assessment_date,
            framework_name: metadata.framework_name.clone(),
            framework_version: metadata.version.clone(),
        },
        scores,
        gaps,
        recommendations,
    }
}
