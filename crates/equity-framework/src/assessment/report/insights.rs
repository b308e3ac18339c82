use super::super::catalog::QuestionCatalog;
use super::super::recommendations::{actions_for, ClosingRecommendation};
use super::super::scoring::ScoreCard;
use super::views::{FocusArea, RecommendationBlock};

pub(crate) fn build_recommendations(
    catalog: &QuestionCatalog,
    scores: &ScoreCard,
) -> RecommendationBlock {
    let focus = scores.lowest_category().map(|lowest| FocusArea {
        category: lowest.category.clone(),
        percentage: lowest.percentage,
        actions: catalog
            .category(&lowest.category)
            .map(actions_for)
            .unwrap_or_default(),
    });

    RecommendationBlock {
        focus,
        closing: ClosingRecommendation::for_band(scores.overall.band),
    }
}
