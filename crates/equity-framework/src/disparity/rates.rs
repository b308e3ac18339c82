use super::table::WonderTable;
use super::DisparityError;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, warn};

pub const DEATHS_COLUMN: &str = "Deaths";
pub const BIRTHS_COLUMN: &str = "Births";

/// Rates are expressed per this many live births.
pub const RATE_MULTIPLIER: f64 = 100_000.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateRow {
    pub group: Vec<String>,
    pub deaths: f64,
    pub births: f64,
    pub rate: f64,
}

impl RateRow {
    pub fn label(&self) -> String {
        self.group.join(" / ")
    }
}

/// Joined death and birth totals per group, highest rate first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateTable {
    pub group_by: Vec<String>,
    pub rows: Vec<RateRow>,
}

impl RateTable {
    pub fn total_deaths(&self) -> f64 {
        self.rows.iter().map(|row| row.deaths).sum()
    }

    pub fn total_births(&self) -> f64 {
        self.rows.iter().map(|row| row.births).sum()
    }

    /// Ratio of every group's rate to the first group whose `group_column`
    /// value equals `baseline_group`.
    pub fn disparity_ratios(
        &self,
        baseline_group: &str,
        group_column: &str,
    ) -> Result<Vec<DisparityRow>, DisparityError> {
        let column = self
            .group_by
            .iter()
            .position(|name| name == group_column)
            .ok_or_else(|| DisparityError::MissingColumn {
                column: group_column.to_string(),
                dataset: "rates",
            })?;

        let baseline = self
            .rows
            .iter()
            .find(|row| row.group[column] == baseline_group)
            .ok_or_else(|| DisparityError::BaselineNotFound(baseline_group.to_string()))?;

        if baseline.rate == 0.0 {
            return Err(DisparityError::ZeroBaseline(baseline_group.to_string()));
        }

        info!(
            baseline = baseline_group,
            baseline_rate = baseline.rate,
            groups = self.rows.len(),
            "calculated disparity ratios"
        );

        Ok(self
            .rows
            .iter()
            .map(|row| DisparityRow {
                group: row.group.clone(),
                rate: row.rate,
                ratio: row.rate / baseline.rate,
                is_baseline: row.group[column] == baseline_group,
            })
            .collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Higher,
    Lower,
    Equal,
}

impl Direction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Higher => "higher",
            Self::Lower => "lower",
            Self::Equal => "equal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisparityRow {
    pub group: Vec<String>,
    pub rate: f64,
    pub ratio: f64,
    pub is_baseline: bool,
}

impl DisparityRow {
    pub fn label(&self) -> String {
        self.group.join(" / ")
    }

    pub fn direction(&self) -> Direction {
        if self.ratio > 1.0 {
            Direction::Higher
        } else if self.ratio < 1.0 {
            Direction::Lower
        } else {
            Direction::Equal
        }
    }

    /// Distance from the baseline rate in percent, `|ratio - 1| * 100`.
    pub fn percent_difference(&self) -> f64 {
        (self.ratio - 1.0).abs() * 100.0
    }
}

/// Sums deaths and births per group, joins the groups present in both
/// tables and computes deaths per 100,000 births.
pub fn calculate_rates(
    deaths: &WonderTable,
    births: &WonderTable,
    group_by: &[&str],
) -> Result<RateTable, DisparityError> {
    if group_by.is_empty() {
        return Err(DisparityError::EmptyGrouping);
    }

    let death_totals = aggregate(deaths, group_by, DEATHS_COLUMN, "deaths")?;
    let birth_totals = aggregate(births, group_by, BIRTHS_COLUMN, "births")?;

    let mut rows: Vec<RateRow> = death_totals
        .into_iter()
        .filter_map(|(group, deaths)| {
            let births = *birth_totals.get(&group)?;
            if births <= 0.0 {
                warn!(group = %group.join(" / "), "dropping group with no recorded births");
                return None;
            }
            Some(RateRow {
                rate: deaths / births * RATE_MULTIPLIER,
                group,
                deaths,
                births,
            })
        })
        .collect();

    rows.sort_by(|left, right| right.rate.total_cmp(&left.rate));

    let table = RateTable {
        group_by: group_by.iter().map(|column| column.to_string()).collect(),
        rows,
    };

    info!(
        groups = table.rows.len(),
        deaths = table.total_deaths(),
        births = table.total_births(),
        "calculated rates"
    );

    Ok(table)
}

fn aggregate(
    table: &WonderTable,
    group_by: &[&str],
    value_column: &str,
    dataset: &'static str,
) -> Result<BTreeMap<Vec<String>, f64>, DisparityError> {
    for column in group_by.iter().copied().chain(std::iter::once(value_column)) {
        if table.column_index(column).is_none() {
            return Err(DisparityError::MissingColumn {
                column: column.to_string(),
                dataset,
            });
        }
    }

    let mut totals = BTreeMap::new();
    for row in table.rows() {
        let key: Option<Vec<String>> = group_by
            .iter()
            .map(|column| row.get(column).map(str::to_string))
            .collect();
        let Some(key) = key else {
            continue;
        };
        let total = totals.entry(key).or_insert(0.0);
        *total += row.number(value_column).unwrap_or(0.0);
    }

    Ok(totals)
}
