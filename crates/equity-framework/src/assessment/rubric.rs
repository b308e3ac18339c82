use super::catalog::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Interpretation band for a percentage score. Each band's upper bound is
/// inclusive, so a value sitting exactly on a boundary reads as the lower band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RubricBand {
    Critical,
    Moderate,
    Strong,
    BestInClass,
}

/// Inclusive upper bounds in ascending order; anything above the last bound
/// falls through to `BestInClass`.
const BAND_UPPER_BOUNDS: [(f64, RubricBand); 3] = [
    (40.0, RubricBand::Critical),
    (60.0, RubricBand::Moderate),
    (80.0, RubricBand::Strong),
];

impl RubricBand {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Critical,
            Self::Moderate,
            Self::Strong,
            Self::BestInClass,
        ]
    }

    pub fn for_percentage(percentage: f64) -> Self {
        BAND_UPPER_BOUNDS
            .iter()
            .find(|(upper, _)| percentage <= *upper)
            .map(|(_, band)| *band)
            .unwrap_or(Self::BestInClass)
    }

    /// Range label used as the key in the scoring guide.
    pub const fn range_label(self) -> &'static str {
        match self {
            Self::Critical => "0-40",
            Self::Moderate => "41-60",
            Self::Strong => "61-80",
            Self::BestInClass => "81-100",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Moderate => "Moderate",
            Self::Strong => "Strong",
            Self::BestInClass => "Best-in-Class",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Critical => 0,
            Self::Moderate => 1,
            Self::Strong => 2,
            Self::BestInClass => 3,
        }
    }
}

/// Interpretation text per band, taken from the catalog's scoring guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterpretationRubric {
    texts: [String; 4],
}

impl InterpretationRubric {
    pub fn new(critical: String, moderate: String, strong: String, best_in_class: String) -> Self {
        Self {
            texts: [critical, moderate, strong, best_in_class],
        }
    }

    pub(crate) fn from_labels(labels: &BTreeMap<String, String>) -> Result<Self, CatalogError> {
        let mut texts: [String; 4] = Default::default();
        for band in RubricBand::ordered() {
            let text = labels.get(band.range_label()).ok_or_else(|| {
                CatalogError::MissingField(format!(
                    "scoring_guide.interpretation.{}",
                    band.range_label()
                ))
            })?;
            texts[band.index()] = text.clone();
        }
        Ok(Self { texts })
    }

    pub fn text(&self, band: RubricBand) -> &str {
        &self.texts[band.index()]
    }

    /// Interpretation for an unrounded percentage.
    pub fn interpret(&self, percentage: f64) -> &str {
        self.text(RubricBand::for_percentage(percentage))
    }
}
