use super::catalog::{Category, Question, QuestionCatalog};
use super::responses::ResponseSet;
use super::rubric::RubricBand;
use serde::Serialize;
use tracing::debug;

/// Points for a single answer. Unknown or missing responses earn zero.
pub fn score_question(question: &Question, response: Option<&str>) -> u8 {
    match response {
        Some(answer) => question.score_for(answer).unwrap_or_else(|| {
            debug!(question = %question.id, response = answer, "unrecognized response scored as 0");
            0
        }),
        None => 0,
    }
}

/// Raw category tally before any rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryScore {
    pub points_earned: u32,
    pub max_points: u32,
    pub percentage: f64,
}

/// Sums a category's question scores. Unanswered questions still count
/// toward `max_points`.
pub fn score_category(category: &Category, responses: &ResponseSet) -> CategoryScore {
    let points_earned = category
        .questions
        .iter()
        .map(|question| u32::from(score_question(question, responses.get(&question.id))))
        .sum();
    let max_points = category.max_points();

    CategoryScore {
        points_earned,
        max_points,
        percentage: percentage_of(points_earned, max_points),
    }
}

pub(crate) fn percentage_of(earned: u32, max: u32) -> f64 {
    if max == 0 {
        return 0.0;
    }
    f64::from(earned) * 100.0 / f64::from(max)
}

/// Rounds to one decimal place. Exact ties go to the even digit
/// (1.25 -> 1.2); values that only become ties after scaling round toward
/// their true side (0.15 is stored just below, so it gives 0.1).
pub fn round_one_decimal(value: f64) -> f64 {
    let scaled = value * 10.0;
    let residual = value.mul_add(10.0, -scaled);
    let rounded = if scaled.fract().abs() == 0.5 && residual != 0.0 {
        if residual > 0.0 {
            scaled.ceil()
        } else {
            scaled.floor()
        }
    } else {
        scaled.round_ties_even()
    };
    rounded / 10.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryResult {
    pub category: String,
    pub points_earned: u32,
    pub max_points: u32,
    /// Rounded to one decimal place.
    pub percentage: f64,
    pub band: RubricBand,
    pub interpretation: String,
    #[serde(skip)]
    exact_percentage: f64,
}

impl CategoryResult {
    /// Unrounded percentage, used for banding and focus selection.
    pub fn exact_percentage(&self) -> f64 {
        self.exact_percentage
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownEntry {
    pub category: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallResult {
    /// Rounded to one decimal place.
    pub percentage: f64,
    pub band: RubricBand,
    pub interpretation: String,
    pub pillar_breakdown: Vec<BreakdownEntry>,
    #[serde(skip)]
    exact_percentage: f64,
}

impl OverallResult {
    pub fn exact_percentage(&self) -> f64 {
        self.exact_percentage
    }
}

/// Category results in catalog order plus the overall roll-up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCard {
    pub categories: Vec<CategoryResult>,
    pub overall: OverallResult,
}

impl ScoreCard {
    /// Category with the lowest displayed percentage; the earliest declared
    /// one wins a tie.
    pub fn lowest_category(&self) -> Option<&CategoryResult> {
        self.categories.iter().fold(None, |lowest, candidate| match lowest {
            Some(current) if current.percentage <= candidate.percentage => Some(current),
            _ => Some(candidate),
        })
    }

    pub fn category(&self, id: &str) -> Option<&CategoryResult> {
        self.categories.iter().find(|result| result.category == id)
    }
}

/// Scores every category and averages their percentages with equal weight,
/// regardless of how many questions each holds.
pub fn score_overall(catalog: &QuestionCatalog, responses: &ResponseSet) -> ScoreCard {
    let rubric = catalog.rubric();
    let categories: Vec<CategoryResult> = catalog
        .categories()
        .iter()
        .map(|category| {
            let score = score_category(category, responses);
            let band = RubricBand::for_percentage(score.percentage);
            debug!(
                category = %category.id,
                earned = score.points_earned,
                max = score.max_points,
                percentage = score.percentage,
                "scored category"
            );
            CategoryResult {
                category: category.id.clone(),
                points_earned: score.points_earned,
                max_points: score.max_points,
                percentage: round_one_decimal(score.percentage),
                band,
                interpretation: rubric.text(band).to_string(),
                exact_percentage: score.percentage,
            }
        })
        .collect();

    let exact_overall = if categories.is_empty() {
        0.0
    } else {
        categories
            .iter()
            .map(|result| result.exact_percentage)
            .sum::<f64>()
            / categories.len() as f64
    };
    let band = RubricBand::for_percentage(exact_overall);

    let pillar_breakdown = categories
        .iter()
        .map(|result| BreakdownEntry {
            category: result.category.clone(),
            percentage: result.percentage,
        })
        .collect();

    ScoreCard {
        overall: OverallResult {
            percentage: round_one_decimal(exact_overall),
            band,
            interpretation: rubric.text(band).to_string(),
            pillar_breakdown,
            exact_percentage: exact_overall,
        },
        categories,
    }
}
