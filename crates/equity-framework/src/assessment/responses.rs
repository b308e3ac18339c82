use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("failed to read responses: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid response JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid response CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Answers for one scoring run, keyed by question id. Questions absent from
/// the set are unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseSet {
    answers: BTreeMap<String, String>,
}

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an answer, returning the one it replaced.
    pub fn insert(
        &mut self,
        question_id: impl Into<String>,
        response: impl Into<String>,
    ) -> Option<String> {
        self.answers.insert(question_id.into(), response.into())
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.answers.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.answers
            .iter()
            .map(|(id, response)| (id.as_str(), response.as_str()))
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ResponseError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, ResponseError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Reads `id,response` rows. Blank responses are left unanswered and a
    /// repeated id keeps its last answer.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, ResponseError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut responses = Self::new();

        for record in csv_reader.deserialize::<ResponseRow>() {
            let row = record?;
            let Some(response) = row.response else {
                debug!(question = %row.id, "skipping blank response");
                continue;
            };
            if let Some(previous) = responses.insert(row.id.clone(), response) {
                warn!(question = %row.id, %previous, "duplicate response row; keeping the later answer");
            }
        }

        Ok(responses)
    }

    /// Loads a response file, treating `.csv` files as CSV and anything else
    /// as a JSON object.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ResponseError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);

        if is_csv {
            Self::from_csv_reader(file)
        } else {
            Self::from_json_reader(std::io::BufReader::new(file))
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ResponseSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            answers: iter
                .into_iter()
                .map(|(id, response)| (id.into(), response.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResponseRow {
    #[serde(alias = "question_id")]
    id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    response: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
