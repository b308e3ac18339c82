use super::views::AssessmentReport;
use std::fmt;

const WIDE_RULE: usize = 80;
const NARROW_RULE: usize = 60;

/// Human-readable rendering of an [`AssessmentReport`].
pub struct Narrative<'a>(pub &'a AssessmentReport);

pub fn render_narrative(report: &AssessmentReport) -> String {
    Narrative(report).to_string()
}

fn rule(f: &mut fmt::Formatter<'_>, width: usize) -> fmt::Result {
    writeln!(f, "{}", "=".repeat(width))
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f)?;
    rule(f, WIDE_RULE)?;
    writeln!(f, "{title}")?;
    rule(f, WIDE_RULE)
}

impl fmt::Display for Narrative<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let header = &report.header;

        rule(f, WIDE_RULE)?;
        writeln!(
            f,
            "{} ASSESSMENT REPORT",
            header.framework_name.to_uppercase()
        )?;
        writeln!(
            f,
            "Framework: {} v{}",
            header.framework_name, header.framework_version
        )?;
        writeln!(f, "Organization: {}", header.organization)?;
        writeln!(f, "Date: {}", header.assessment_date.format("%B %d, %Y"))?;
        rule(f, WIDE_RULE)?;

        for result in &report.scores.categories {
            writeln!(f)?;
            writeln!(f, "{}:", result.category)?;
            writeln!(
                f,
                "   Score: {}/{} ({:.1}%)",
                result.points_earned, result.max_points, result.percentage
            )?;
            writeln!(f, "   {}", result.interpretation)?;
        }

        let overall = &report.scores.overall;
        writeln!(f)?;
        rule(f, NARROW_RULE)?;
        writeln!(f, "OVERALL SCORE: {:.1}%", overall.percentage)?;
        writeln!(f, "INTERPRETATION: {}", overall.interpretation)?;
        rule(f, NARROW_RULE)?;

        let gaps = &report.gaps;
        section(
            f,
            &format!(
                "PRIORITY GAPS (questions scoring \u{2264}{} points)",
                gaps.threshold
            ),
        )?;
        if gaps.total() == 0 {
            writeln!(
                f,
                "\nNo answered questions scored at or below {} points.",
                gaps.threshold
            )?;
        }
        for (entry, shown) in gaps.displayed() {
            let count = entry.gaps.len();
            writeln!(
                f,
                "\n{} ({} gap{}):",
                entry.category,
                count,
                if count == 1 { "" } else { "s" }
            )?;
            for gap in shown {
                writeln!(f, "\n  \u{2022} {}", gap.question)?;
                writeln!(
                    f,
                    "    Current: {} ({}/{} points)",
                    gap.response, gap.score, gap.max_score
                )?;
                if !gap.rationale.is_empty() {
                    writeln!(f, "    Why it matters: {}", gap.rationale)?;
                }
            }
            if count > shown.len() {
                writeln!(f, "\n  ... and {} more", count - shown.len())?;
            }
        }

        let recommendations = &report.recommendations;
        section(f, "RECOMMENDATIONS")?;
        if let Some(focus) = &recommendations.focus {
            writeln!(f, "\nPRIORITY FOCUS AREA: {}", focus.category)?;
            writeln!(f, "Current Score: {:.1}%", focus.percentage)?;
            writeln!(
                f,
                "\nThis pillar represents your greatest opportunity for improvement."
            )?;
            if !focus.actions.is_empty() {
                writeln!(f, "\nRecommended Actions for {}:", focus.category)?;
                for (index, action) in focus.actions.iter().enumerate() {
                    writeln!(f, "  {}. {}", index + 1, action)?;
                }
            }
        }

        let closing = &recommendations.closing;
        section(f, "OVERALL ASSESSMENT")?;
        writeln!(f, "\n{}: {}", closing.level, closing.headline)?;
        writeln!(f, "   Recommendation: {}", closing.recommendation)
    }
}
