use super::race::standardize_race_ethnicity;
use super::DisparityError;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Codes CDC WONDER exports in place of suppressed or unavailable values.
pub const SUPPRESSION_CODES: [&str; 4] = ["Suppressed", "Unreliable", "Not Applicable", "Missing"];

pub const RACE_ETHNICITY_COLUMN: &str = "race_ethnicity";

/// Tab-separated aggregate export with missing values already blanked out.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WonderTable {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

/// Values treated as missing in addition to empty cells.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOptions {
    pub missing_values: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            missing_values: SUPPRESSION_CODES.iter().map(|code| code.to_string()).collect(),
        }
    }
}

impl WonderTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { headers, rows }
    }

    pub fn from_path<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Self, DisparityError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, options)
    }

    pub fn from_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<Self, DisparityError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|header| header.to_string())
            .collect();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let row: Vec<Option<String>> = (0..headers.len())
                .map(|index| {
                    record
                        .get(index)
                        .filter(|value| !value.is_empty())
                        .filter(|value| {
                            !options
                                .missing_values
                                .iter()
                                .any(|code| code.as_str() == *value)
                        })
                        .map(|value| value.to_string())
                })
                .collect();
            if row.iter().all(Option::is_none) {
                continue;
            }
            rows.push(row);
        }

        info!(rows = rows.len(), columns = headers.len(), "loaded tab-separated table");

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == column)
    }

    pub fn rows(&self) -> impl Iterator<Item = TableRow<'_>> {
        self.rows.iter().map(move |cells| TableRow {
            headers: &self.headers,
            cells,
        })
    }

    /// Sum of a numeric column, skipping missing or unparseable cells.
    pub fn column_total(&self, column: &str) -> f64 {
        self.rows().filter_map(|row| row.number(column)).sum()
    }

    /// Adds a standardized `race_ethnicity` column derived from the
    /// `Hispanic Origin` and `Race` columns. An existing column is replaced.
    pub fn with_race_ethnicity(&self) -> Self {
        let hispanic_index = self.column_index("Hispanic Origin");
        let race_index = self.column_index("Race");
        let existing = self.column_index(RACE_ETHNICITY_COLUMN);

        let mut headers = self.headers.clone();
        let target = match existing {
            Some(index) => index,
            None => {
                headers.push(RACE_ETHNICITY_COLUMN.to_string());
                headers.len() - 1
            }
        };

        let rows = self
            .rows
            .iter()
            .map(|cells| {
                let cell = |index: Option<usize>| {
                    index
                        .and_then(|index| cells.get(index))
                        .and_then(|value| value.as_deref())
                        .unwrap_or("")
                };
                let category =
                    standardize_race_ethnicity(cell(hispanic_index), cell(race_index));
                let mut cells = cells.clone();
                if target < cells.len() {
                    cells[target] = Some(category.to_string());
                } else {
                    cells.push(Some(category.to_string()));
                }
                cells
            })
            .collect();

        Self { headers, rows }
    }
}

/// Borrowed view of one row, addressed by column name.
#[derive(Debug, Clone, Copy)]
pub struct TableRow<'a> {
    headers: &'a [String],
    cells: &'a [Option<String>],
}

impl<'a> TableRow<'a> {
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let index = self.headers.iter().position(|header| header == column)?;
        self.cells.get(index)?.as_deref()
    }

    /// Lenient numeric read: missing or non-numeric cells yield `None`.
    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column)?
            .replace(',', "")
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }
}
