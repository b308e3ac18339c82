mod render;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use equity_framework::assessment::report::Narrative;
use equity_framework::assessment::{ReportOptions, ResponseSet, ScoringEngine};
use equity_framework::config::{parse_gap_threshold, AppConfig};
use equity_framework::disparity::{
    calculate_rates, LoadOptions, WonderTable, DEFAULT_BASELINE_GROUP, RACE_ETHNICITY_COLUMN,
};
use equity_framework::error::AppError;
use equity_framework::{telemetry, QuestionCatalog};
use render::{CatalogListing, DisparitySummary, GapListing};
use std::path::PathBuf;
use tracing::{info, warn};

const DEMO_CATALOG: &str = include_str!("../framework/assessment_questions.json");
const DEMO_RESPONSES: &str = include_str!("../framework/sample_responses.json");
const DEMO_ORGANIZATION: &str = "Sample Health System";

#[derive(Parser, Debug)]
#[command(
    name = "Operational Equity Framework",
    about = "Score Operational Equity Framework assessments and analyze outcome disparities",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a response file and print the full assessment report
    Score(ScoreArgs),
    /// List every answered question at or below the gap threshold
    Gaps(GapsArgs),
    /// Describe the questions and rubric of a catalog
    Catalog(CatalogArgs),
    /// Run the bundled sample catalog against the bundled sample responses
    Demo(DemoArgs),
    /// Compute rates per 100,000 births and disparity ratios from WONDER exports
    Disparity(DisparityArgs),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Question catalog JSON (defaults to EQUITY_CATALOG_PATH)
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Responses as a JSON object or an id,response CSV
    #[arg(long)]
    responses: PathBuf,
    /// Organization named in the report header
    #[arg(long)]
    organization: Option<String>,
    /// Assessment date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
    /// Highest score (0-5) still flagged as a gap
    #[arg(long, value_parser = parse_threshold)]
    gap_threshold: Option<u8>,
    /// Gaps shown per category before truncating
    #[arg(long, value_parser = parse_display_limit)]
    gaps_per_category: Option<usize>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct GapsArgs {
    #[arg(long)]
    catalog: Option<PathBuf>,
    #[arg(long)]
    responses: PathBuf,
    #[arg(long, value_parser = parse_threshold)]
    gap_threshold: Option<u8>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct CatalogArgs {
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DemoArgs {
    /// Assessment date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct DisparityArgs {
    /// Tab-separated deaths export
    #[arg(long)]
    deaths: PathBuf,
    /// Tab-separated births export
    #[arg(long)]
    births: PathBuf,
    /// Grouping column; repeat for multi-column groups
    #[arg(long = "group-by", default_value = RACE_ETHNICITY_COLUMN)]
    group_by: Vec<String>,
    /// Group whose rate every other group is compared against
    #[arg(long, default_value = DEFAULT_BASELINE_GROUP)]
    baseline: String,
    /// Grouping column holding the baseline group
    #[arg(long, default_value = RACE_ETHNICITY_COLUMN)]
    group_column: String,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    info!(environment = ?config.environment, "equity framework cli starting");

    match cli.command {
        Command::Score(args) => run_score(&config, args),
        Command::Gaps(args) => run_gaps(&config, args),
        Command::Catalog(args) => run_catalog(&config, args),
        Command::Demo(args) => run_demo(args),
        Command::Disparity(args) => run_disparity(args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn parse_threshold(raw: &str) -> Result<u8, String> {
    parse_gap_threshold(raw).map_err(|err| err.to_string())
}

fn parse_display_limit(raw: &str) -> Result<usize, String> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|limit| *limit > 0)
        .ok_or_else(|| format!("'{raw}' is not a positive number of gaps"))
}

fn load_engine(config: &AppConfig, catalog: Option<PathBuf>) -> Result<ScoringEngine, AppError> {
    let path = catalog.unwrap_or_else(|| config.assessment.catalog_path.clone());
    let catalog = QuestionCatalog::from_path(&path)?;
    Ok(ScoringEngine::new(catalog))
}

fn run_score(config: &AppConfig, args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        catalog,
        responses,
        organization,
        date,
        gap_threshold,
        gaps_per_category,
        format,
    } = args;

    let engine = load_engine(config, catalog)?;
    let responses = ResponseSet::from_path(&responses)?;

    let options = ReportOptions::new(
        organization.unwrap_or_else(|| config.assessment.organization.clone()),
        date.unwrap_or_else(|| Local::now().date_naive()),
    )
    .with_gap_threshold(gap_threshold.unwrap_or(config.assessment.gap_threshold))
    .with_gaps_displayed(gaps_per_category.unwrap_or(config.assessment.gaps_per_category));

    let report = engine.generate_report(&responses, &options);
    match format {
        OutputFormat::Text => print!("{}", Narrative(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn run_gaps(config: &AppConfig, args: GapsArgs) -> Result<(), AppError> {
    let engine = load_engine(config, args.catalog)?;
    let responses = ResponseSet::from_path(&args.responses)?;
    let threshold = args
        .gap_threshold
        .unwrap_or(config.assessment.gap_threshold);

    let gaps = engine.find_gaps(&responses, threshold);
    match args.format {
        OutputFormat::Text => print!("{}", GapListing::new(&gaps, threshold)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&gaps)?),
    }
    Ok(())
}

fn run_catalog(config: &AppConfig, args: CatalogArgs) -> Result<(), AppError> {
    let engine = load_engine(config, args.catalog)?;
    print!("{}", CatalogListing(engine.catalog()));
    Ok(())
}

fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let catalog = QuestionCatalog::from_json_str(DEMO_CATALOG)?;
    let responses = ResponseSet::from_json_str(DEMO_RESPONSES)?;
    let engine = ScoringEngine::new(catalog);

    let options = ReportOptions::new(
        DEMO_ORGANIZATION,
        args.date.unwrap_or_else(|| Local::now().date_naive()),
    );
    let report = engine.generate_report(&responses, &options);

    match args.format {
        OutputFormat::Text => print!("{}", Narrative(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn run_disparity(args: DisparityArgs) -> Result<(), AppError> {
    let options = LoadOptions::default();
    let deaths = prepare_table(WonderTable::from_path(&args.deaths, &options)?);
    let births = prepare_table(WonderTable::from_path(&args.births, &options)?);

    let group_by: Vec<&str> = args.group_by.iter().map(String::as_str).collect();
    let rates = calculate_rates(&deaths, &births, &group_by)?;

    let disparities = if group_by.contains(&args.group_column.as_str()) {
        Some(rates.disparity_ratios(&args.baseline, &args.group_column)?)
    } else {
        warn!(
            column = %args.group_column,
            "baseline column is not grouped; skipping disparity ratios"
        );
        None
    };

    let summary = DisparitySummary {
        baseline: &args.baseline,
        rates: &rates,
        disparities: disparities.as_deref(),
    };
    match args.format {
        OutputFormat::Text => print!("{summary}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }
    Ok(())
}

/// Derives `race_ethnicity` for exports that carry separate Hispanic origin
/// and race columns.
fn prepare_table(table: WonderTable) -> WonderTable {
    let derivable = table.column_index("Hispanic Origin").is_some()
        || table.column_index("Race").is_some();
    if table.column_index(RACE_ETHNICITY_COLUMN).is_none() && derivable {
        table.with_race_ethnicity()
    } else {
        table
    }
}
