//! Maternal mortality disparity toolkit over CDC WONDER style exports.

mod race;
mod rates;
mod table;

pub use race::standardize_race_ethnicity;
pub use rates::{
    calculate_rates, Direction, DisparityRow, RateRow, RateTable, BIRTHS_COLUMN, DEATHS_COLUMN,
    RATE_MULTIPLIER,
};
pub use table::{LoadOptions, TableRow, WonderTable, RACE_ETHNICITY_COLUMN, SUPPRESSION_CODES};

use std::io::Read;

pub const DEFAULT_BASELINE_GROUP: &str = "White (NH)";

#[derive(Debug, thiserror::Error)]
pub enum DisparityError {
    #[error("failed to read table: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tab-separated data: {0}")]
    Csv(#[from] csv::Error),
    #[error("column '{column}' not found in {dataset} data")]
    MissingColumn {
        column: String,
        dataset: &'static str,
    },
    #[error("at least one grouping column is required")]
    EmptyGrouping,
    #[error("baseline group '{0}' not found in rate table")]
    BaselineNotFound(String),
    #[error("baseline group '{0}' has a rate of zero")]
    ZeroBaseline(String),
}

/// Loads a tab-separated export with the default suppression codes.
pub fn load_wonder_table<R: Read>(reader: R) -> Result<WonderTable, DisparityError> {
    WonderTable::from_reader(reader, &LoadOptions::default())
}

pub fn disparity_ratios(
    rates: &RateTable,
    baseline_group: &str,
    group_column: &str,
) -> Result<Vec<DisparityRow>, DisparityError> {
    rates.disparity_ratios(baseline_group, group_column)
}
