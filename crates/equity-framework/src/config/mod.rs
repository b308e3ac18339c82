use crate::assessment::{DEFAULT_GAP_THRESHOLD, MAX_QUESTION_SCORE};
use std::env;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_CATALOG_PATH: &str = "framework/assessment_questions.json";
pub const DEFAULT_GAPS_PER_CATEGORY: usize = 5;
pub const DEFAULT_ORGANIZATION: &str = "Organization";

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub assessment: AssessmentConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("EQUITY_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let catalog_path = env::var("EQUITY_CATALOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CATALOG_PATH));

        let gap_threshold = match env::var("EQUITY_GAP_THRESHOLD") {
            Ok(raw) => parse_gap_threshold(&raw)?,
            Err(_) => DEFAULT_GAP_THRESHOLD,
        };

        let gaps_per_category = match env::var("EQUITY_GAPS_PER_CATEGORY") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or(ConfigError::InvalidGapDisplayLimit)?,
            Err(_) => DEFAULT_GAPS_PER_CATEGORY,
        };

        let organization =
            env::var("EQUITY_ORGANIZATION").unwrap_or_else(|_| DEFAULT_ORGANIZATION.to_string());

        let log_level = env::var("EQUITY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            assessment: AssessmentConfig {
                catalog_path,
                gap_threshold,
                gaps_per_category,
                organization,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Defaults applied to scoring runs unless overridden on the command line.
#[derive(Debug, Clone)]
pub struct AssessmentConfig {
    pub catalog_path: PathBuf,
    pub gap_threshold: u8,
    pub gaps_per_category: usize,
    pub organization: String,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

pub fn parse_gap_threshold(raw: &str) -> Result<u8, ConfigError> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|threshold| *threshold <= MAX_QUESTION_SCORE)
        .ok_or(ConfigError::InvalidGapThreshold)
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidGapThreshold,
    InvalidGapDisplayLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidGapThreshold => write!(
                f,
                "EQUITY_GAP_THRESHOLD must be an integer between 0 and {}",
                MAX_QUESTION_SCORE
            ),
            ConfigError::InvalidGapDisplayLimit => {
                write!(f, "EQUITY_GAPS_PER_CATEGORY must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("EQUITY_ENV");
        env::remove_var("EQUITY_CATALOG_PATH");
        env::remove_var("EQUITY_GAP_THRESHOLD");
        env::remove_var("EQUITY_GAPS_PER_CATEGORY");
        env::remove_var("EQUITY_ORGANIZATION");
        env::remove_var("EQUITY_LOG_LEVEL");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(
            config.assessment.catalog_path,
            PathBuf::from(DEFAULT_CATALOG_PATH)
        );
        assert_eq!(config.assessment.gap_threshold, 2);
        assert_eq!(config.assessment.gaps_per_category, 5);
        assert_eq!(config.assessment.organization, "Organization");
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn reads_overrides_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("EQUITY_ENV", "prod");
        env::set_var("EQUITY_GAP_THRESHOLD", "3");
        env::set_var("EQUITY_GAPS_PER_CATEGORY", "10");
        env::set_var("EQUITY_ORGANIZATION", "Mercy Health");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.assessment.gap_threshold, 3);
        assert_eq!(config.assessment.gaps_per_category, 10);
        assert_eq!(config.assessment.organization, "Mercy Health");
    }

    #[test]
    fn rejects_threshold_above_question_maximum() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("EQUITY_GAP_THRESHOLD", "6");
        let error = AppConfig::load().expect_err("threshold out of range");
        reset_env();
        assert!(matches!(error, ConfigError::InvalidGapThreshold));
    }

    #[test]
    fn rejects_zero_gap_display_limit() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("EQUITY_GAPS_PER_CATEGORY", "0");
        let error = AppConfig::load().expect_err("limit must be positive");
        reset_env();
        assert!(matches!(error, ConfigError::InvalidGapDisplayLimit));
    }
}
