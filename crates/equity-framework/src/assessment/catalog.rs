use super::rubric::InterpretationRubric;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Highest score any single response can earn.
pub const MAX_QUESTION_SCORE: u8 = 5;

const METADATA_KEY: &str = "metadata";
const SCORING_GUIDE_KEY: &str = "scoring_guide";

/// Failure to produce a usable question catalog. No partial catalog is ever
/// returned alongside one of these.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read question catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed question catalog: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("question catalog is missing required field `{0}`")]
    MissingField(String),
    #[error("category `{category}` is invalid: {source}")]
    InvalidCategory {
        category: String,
        source: serde_json::Error,
    },
    #[error(
        "question `{question}` maps response `{response}` to {value}, expected an integer between 0 and 5"
    )]
    InvalidScore {
        question: String,
        response: String,
        value: Value,
    },
    #[error("question id `{0}` appears more than once")]
    DuplicateQuestion(String),
    #[error("declared pillar `{0}` has no matching category")]
    UnknownPillar(String),
    #[error("question catalog declares no categories")]
    Empty,
}

/// Descriptive header of the framework a catalog belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogMetadata {
    pub framework_name: String,
    pub version: String,
    pub declared_total_questions: Option<usize>,
}

/// One allowed answer and the points it earns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseOption {
    pub response: String,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub options: Vec<ResponseOption>,
    pub rationale: String,
}

impl Question {
    /// Score mapped to an exact response string, if the response is known.
    pub fn score_for(&self, response: &str) -> Option<u8> {
        self.options
            .iter()
            .find(|option| option.response == response)
            .map(|option| option.score)
    }
}

/// A pillar of the framework with its questions in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: String,
    pub questions: Vec<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
}

impl Category {
    /// Points available when every question earns the maximum, answered or not.
    pub fn max_points(&self) -> u32 {
        self.questions.len() as u32 * u32::from(MAX_QUESTION_SCORE)
    }
}

/// Immutable question set for a scoring session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionCatalog {
    metadata: CatalogMetadata,
    rubric: InterpretationRubric,
    categories: Vec<Category>,
}

impl QuestionCatalog {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_reader(reader)?;
        Self::from_document(document)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(raw)?;
        Self::from_document(document)
    }

    pub fn metadata(&self) -> &CatalogMetadata {
        &self.metadata
    }

    pub fn rubric(&self) -> &InterpretationRubric {
        &self.rubric
    }

    /// Categories in their fixed iteration order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn category_ids(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|category| category.id.as_str())
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.categories
            .iter()
            .flat_map(|category| category.questions.iter())
            .find(|question| question.id == id)
    }

    pub fn question_count(&self) -> usize {
        self.categories
            .iter()
            .map(|category| category.questions.len())
            .sum()
    }

    fn from_document(document: CatalogDocument) -> Result<Self, CatalogError> {
        let CatalogDocument {
            metadata,
            scoring_guide,
            mut categories,
        } = document;

        let metadata = metadata.ok_or_else(|| missing(METADATA_KEY))?;
        let interpretation = scoring_guide
            .ok_or_else(|| missing(SCORING_GUIDE_KEY))?
            .interpretation
            .ok_or_else(|| missing("scoring_guide.interpretation"))?;
        let rubric = InterpretationRubric::from_labels(&interpretation)?;

        let order: Vec<String> = match &metadata.pillars {
            Some(pillars) => pillars.clone(),
            None => categories.keys().cloned().collect(),
        };

        let mut seen_questions = HashSet::new();
        let mut parsed = Vec::with_capacity(order.len());
        for id in order {
            let value = categories
                .remove(&id)
                .ok_or_else(|| CatalogError::UnknownPillar(id.clone()))?;
            let category = parse_category(id, value)?;
            for question in &category.questions {
                if !seen_questions.insert(question.id.clone()) {
                    return Err(CatalogError::DuplicateQuestion(question.id.clone()));
                }
            }
            parsed.push(category);
        }

        if parsed.is_empty() {
            return Err(CatalogError::Empty);
        }

        let catalog = Self {
            metadata: CatalogMetadata {
                framework_name: metadata.framework_name,
                version: metadata.version,
                declared_total_questions: metadata.total_questions,
            },
            rubric,
            categories: parsed,
        };

        let question_count = catalog.question_count();
        if let Some(declared) = catalog.metadata.declared_total_questions {
            if declared != question_count {
                warn!(
                    declared,
                    actual = question_count,
                    "catalog metadata total_questions does not match its questions"
                );
            }
        }

        info!(
            framework = %catalog.metadata.framework_name,
            version = %catalog.metadata.version,
            questions = question_count,
            categories = catalog.categories.len(),
            "loaded question catalog"
        );

        Ok(catalog)
    }
}

fn missing(field: &str) -> CatalogError {
    CatalogError::MissingField(field.to_string())
}

fn parse_category(id: String, value: Value) -> Result<Category, CatalogError> {
    let document: CategoryDocument =
        serde_json::from_value(value).map_err(|source| CatalogError::InvalidCategory {
            category: id.clone(),
            source,
        })?;

    let questions = document
        .questions
        .ok_or_else(|| missing(&format!("{id}.questions")))?
        .into_iter()
        .enumerate()
        .map(|(index, question)| parse_question(&id, index, question))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Category {
        id,
        questions,
        recommendations: document.recommendations,
    })
}

fn parse_question(
    category: &str,
    index: usize,
    document: QuestionDocument,
) -> Result<Question, CatalogError> {
    let id = document
        .id
        .ok_or_else(|| missing(&format!("{category}.questions[{index}].id")))?;
    let prompt = document
        .question
        .ok_or_else(|| missing(&format!("{category}.questions[{index}].question")))?;
    let scoring = document
        .scoring
        .ok_or_else(|| missing(&format!("{category}.questions[{index}].scoring")))?;

    let options = scoring
        .into_iter()
        .map(|(response, value)| {
            let score = value
                .as_u64()
                .filter(|score| *score <= u64::from(MAX_QUESTION_SCORE))
                .ok_or_else(|| CatalogError::InvalidScore {
                    question: id.clone(),
                    response: response.clone(),
                    value: value.clone(),
                })?;
            Ok(ResponseOption {
                response,
                score: score as u8,
            })
        })
        .collect::<Result<Vec<_>, CatalogError>>()?;

    Ok(Question {
        id,
        prompt,
        options,
        rationale: document.rationale.unwrap_or_default(),
    })
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    metadata: Option<MetadataDocument>,
    scoring_guide: Option<ScoringGuideDocument>,
    #[serde(flatten)]
    categories: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct MetadataDocument {
    framework_name: String,
    #[serde(deserialize_with = "string_or_number")]
    version: String,
    #[serde(default)]
    total_questions: Option<usize>,
    #[serde(default)]
    pillars: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ScoringGuideDocument {
    #[serde(default)]
    interpretation: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
struct CategoryDocument {
    #[serde(default)]
    questions: Option<Vec<QuestionDocument>>,
    #[serde(default)]
    recommendations: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct QuestionDocument {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    scoring: Option<Map<String, Value>>,
    #[serde(default)]
    rationale: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(value),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a version string or number, found {other}"
        ))),
    }
}
