use super::catalog::Category;
use super::rubric::RubricBand;
use serde::Serialize;

static PILLAR_ACTIONS: [(&str, [&str; 5]); 3] = [
    (
        "PROCESS",
        [
            "Review and document all care pathways with equity lens",
            "Implement language accessibility across scheduling and service delivery",
            "Add evening/weekend appointment availability",
            "Establish transportation assistance programs",
            "Integrate community health workers into care teams",
        ],
    ),
    (
        "PEOPLE",
        [
            "Implement mandatory equity training for 100% of staff annually",
            "Tie equity metrics to performance evaluations",
            "Hire and retain workforce representative of patient population",
            "Establish Chief Equity Officer position with budget authority",
            "Create equity champion network across departments",
        ],
    ),
    (
        "TECHNOLOGY",
        [
            "Enable real-time outcome stratification by race/ethnicity in EHR",
            "Implement automated risk alerts for maternal health conditions",
            "Deploy multilingual patient portal",
            "Establish monthly equity dashboard reporting to leadership",
            "Conduct equity impact assessments for all new technology",
        ],
    ),
];

/// Built-in action list for a pillar id, matched case-insensitively.
pub fn default_actions(category_id: &str) -> &'static [&'static str] {
    PILLAR_ACTIONS
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(category_id))
        .map(|(_, actions)| actions.as_slice())
        .unwrap_or(&[])
}

/// Actions for a category: the catalog's own list when it provides one,
/// otherwise the built-in table.
pub fn actions_for(category: &Category) -> Vec<String> {
    match &category.recommendations {
        Some(actions) => actions.clone(),
        None => default_actions(&category.id)
            .iter()
            .map(|action| action.to_string())
            .collect(),
    }
}

/// Fixed closing guidance for the band the overall score lands in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClosingRecommendation {
    pub band: RubricBand,
    pub level: &'static str,
    pub headline: &'static str,
    pub recommendation: &'static str,
}

impl ClosingRecommendation {
    pub fn for_band(band: RubricBand) -> Self {
        let (level, headline, recommendation) = match band {
            RubricBand::Critical => (
                "CRITICAL",
                "Significant operational gaps exist across every pillar.",
                "Engage comprehensive assessment and 6-month implementation support to build foundational infrastructure.",
            ),
            RubricBand::Moderate => (
                "MODERATE",
                "Infrastructure exists but significant improvement needed.",
                "Focus on lowest-scoring pillar first, then address cross-pillar integration.",
            ),
            RubricBand::Strong => (
                "STRONG",
                "Solid infrastructure with targeted improvement opportunities.",
                "Address specific gaps identified, benchmark against best-in-class organizations.",
            ),
            RubricBand::BestInClass => (
                "BEST-IN-CLASS",
                "Comprehensive operational equity infrastructure.",
                "Share practices with peer organizations, pursue publication of success factors.",
            ),
        };

        Self {
            band,
            level,
            headline,
            recommendation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_pillar_has_five_actions() {
        for pillar in ["PROCESS", "PEOPLE", "TECHNOLOGY"] {
            assert_eq!(default_actions(pillar).len(), 5, "{pillar}");
        }
        assert_eq!(
            default_actions("people")[0],
            "Implement mandatory equity training for 100% of staff annually"
        );
        assert!(default_actions("FINANCE").is_empty());
    }

    #[test]
    fn catalog_recommendations_take_precedence() {
        let category = Category {
            id: "PROCESS".to_string(),
            questions: Vec::new(),
            recommendations: Some(vec!["Map referral loops".to_string()]),
        };
        assert_eq!(actions_for(&category), vec!["Map referral loops".to_string()]);
    }

    #[test]
    fn closing_texts_are_distinct_per_band() {
        let levels: Vec<_> = RubricBand::ordered()
            .into_iter()
            .map(|band| ClosingRecommendation::for_band(band).level)
            .collect();
        assert_eq!(levels, vec!["CRITICAL", "MODERATE", "STRONG", "BEST-IN-CLASS"]);
    }
}
