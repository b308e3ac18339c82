pub mod assessment;
pub mod config;
pub mod disparity;
pub mod error;
pub mod telemetry;

pub use assessment::{
    AssessmentReport, CatalogError, InterpretationRubric, QuestionCatalog, ReportOptions,
    ResponseSet, RubricBand, ScoringEngine,
};
