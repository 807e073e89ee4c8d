//! TrendSignal Runner: run orchestration on top of `trendsignal-core`.
//!
//! This crate provides:
//! - Config resolution (TOML, mandatory `seed` / `window` / `version`)
//! - The staged pipeline shared by the batch CLI and the dashboard
//! - Signal-rate aggregation and the success / error report shapes
//! - JSON report emission to stdout and the artifact file
//! - File logging through `tracing`

pub mod config;
pub mod logging;
pub mod metrics;
pub mod report;
pub mod runner;

pub use config::{ConfigDocument, ConfigError, RunConfig};
pub use logging::{init_file_logging, LoggingError, LOG_TIME_FORMAT};
pub use metrics::{
    aggregate, round_to, ErrorReport, MetricsReport, ReportStatus, SignalMetrics, SuccessReport,
    METRIC_NAME, REPORT_DECIMALS, UNKNOWN_VERSION,
};
pub use report::{emit, render, Emission};
pub use runner::{evaluate, run_job, Evaluation, JobOutcome, JobPaths, Run, RunError, Stage};
