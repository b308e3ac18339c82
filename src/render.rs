use equity_framework::assessment::{CategoryGaps, RubricBand, MAX_QUESTION_SCORE};
use equity_framework::disparity::{DisparityRow, RateTable, RATE_MULTIPLIER};
use equity_framework::QuestionCatalog;
use serde::Serialize;
use std::fmt;

/// Catalog overview: metadata, rubric bands and per-category question counts.
pub struct CatalogListing<'a>(pub &'a QuestionCatalog);

impl fmt::Display for CatalogListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let catalog = self.0;
        let metadata = catalog.metadata();

        writeln!(f, "{} v{}", metadata.framework_name, metadata.version)?;
        writeln!(
            f,
            "{} questions across {} categories",
            catalog.question_count(),
            catalog.categories().len()
        )?;

        writeln!(f, "\nInterpretation rubric")?;
        for band in RubricBand::ordered() {
            writeln!(
                f,
                "- {} ({}): {}",
                band.range_label(),
                band.label(),
                catalog.rubric().text(band)
            )?;
        }

        writeln!(f, "\nCategories")?;
        for category in catalog.categories() {
            writeln!(
                f,
                "- {}: {} questions, {} points",
                category.id,
                category.questions.len(),
                category.max_points()
            )?;
            for question in &category.questions {
                writeln!(f, "    {} {}", question.id, question.prompt)?;
            }
        }
        Ok(())
    }
}

/// Untruncated gap list for every category that has one.
pub struct GapListing<'a> {
    gaps: &'a [CategoryGaps],
    threshold: u8,
}

impl<'a> GapListing<'a> {
    pub fn new(gaps: &'a [CategoryGaps], threshold: u8) -> Self {
        Self { gaps, threshold }
    }
}

impl fmt::Display for GapListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total: usize = self.gaps.iter().map(|entry| entry.gaps.len()).sum();
        writeln!(
            f,
            "{} gap{} at or below {}/{} points",
            total,
            if total == 1 { "" } else { "s" },
            self.threshold,
            MAX_QUESTION_SCORE
        )?;

        for entry in self.gaps.iter().filter(|entry| !entry.gaps.is_empty()) {
            writeln!(f, "\n{}", entry.category)?;
            for gap in &entry.gaps {
                writeln!(
                    f,
                    "- [{}] {} | {} ({}/{})",
                    gap.id, gap.question, gap.response, gap.score, gap.max_score
                )?;
            }
        }
        Ok(())
    }
}

/// Rate table plus optional ratios against a baseline group.
#[derive(Debug, Serialize)]
pub struct DisparitySummary<'a> {
    pub baseline: &'a str,
    pub rates: &'a RateTable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disparities: Option<&'a [DisparityRow]>,
}

impl fmt::Display for DisparitySummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Rates per {:.0} live births by {}",
            RATE_MULTIPLIER,
            self.rates.group_by.join(", ")
        )?;
        for row in &self.rates.rows {
            writeln!(
                f,
                "- {}: {:.1} ({:.0} deaths / {:.0} births)",
                row.label(),
                row.rate,
                row.deaths,
                row.births
            )?;
        }

        if let Some(disparities) = self.disparities {
            writeln!(f, "\nDisparity ratios vs {}", self.baseline)?;
            for row in disparities.iter().filter(|row| !row.is_baseline) {
                writeln!(
                    f,
                    "- {}: {:.2}x ({:.1}% {})",
                    row.label(),
                    row.ratio,
                    row.percent_difference(),
                    row.direction().label()
                )?;
            }
        }
        Ok(())
    }
}
