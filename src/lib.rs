//! Ingests test-runner reports (JSON result bundles, JUnit XML), normalizes
//! them into one table and computes quality metrics over it.

pub mod analysis;
pub mod cache;
pub mod config;
pub mod dataset;
pub mod environments;
pub mod error;
pub mod export;
pub mod metrics;
pub mod models;
pub mod sources;

pub use analysis::AnalysisReport;
pub use config::Config;
pub use dataset::Dataset;
pub use environments::{EnvironmentLoader, EnvironmentResultSet};
pub use error::IngestError;
pub use metrics::{MetricsResult, calculate_metrics};
pub use models::{ResultTable, RowFilter, TestResultRow, TestStatus};
pub use sources::SourceAggregator;
