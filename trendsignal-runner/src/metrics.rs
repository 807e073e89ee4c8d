//! Metrics aggregation and the report shapes written at the end of a run.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use trendsignal_core::SignalTable;

use crate::config::RunConfig;

/// Name reported in the `metric` field.
pub const METRIC_NAME: &str = "signal_rate";

/// Version reported when a run fails before any version tag is known.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Decimal places of the reported `value`.
pub const REPORT_DECIMALS: usize = 4;

/// Full-precision reduction of the signal column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalMetrics {
    pub rows_processed: usize,
    pub signal_count: usize,
    /// Proportion of rows with signal 1, unrounded.
    pub signal_rate: f64,
}

impl SignalMetrics {
    pub fn from_signals(signals: &SignalTable) -> Self {
        let rows_processed = signals.row_count();
        let signal_count = signals.signal_count();
        let signal_rate = if rows_processed == 0 {
            0.0
        } else {
            signal_count as f64 / rows_processed as f64
        };
        Self {
            rows_processed,
            signal_count,
            signal_rate,
        }
    }
}

/// Round to `decimals` places, ties to even on the exact binary value
/// (`1/32` becomes `0.0312`).
///
/// Goes through the correctly rounded decimal formatter; scaling by a power
/// of ten first would round the product before the tie is seen.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Success,
    Error,
}

/// Success-shaped report. Field order is the JSON key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessReport {
    pub version: String,
    pub rows_processed: usize,
    pub metric: String,
    pub value: f64,
    pub latency_ms: u64,
    pub seed: i64,
    pub status: ReportStatus,
}

/// Error-shaped report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub version: String,
    pub status: ReportStatus,
    pub error_message: String,
}

impl ErrorReport {
    /// `version` falls back to `"unknown"` when absent.
    pub fn new(version: Option<&str>, error_message: impl Into<String>) -> Self {
        Self {
            version: version.unwrap_or(UNKNOWN_VERSION).to_string(),
            status: ReportStatus::Error,
            error_message: error_message.into(),
        }
    }
}

/// The single record a run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricsReport {
    Success(SuccessReport),
    Error(ErrorReport),
}

impl MetricsReport {
    pub fn status(&self) -> ReportStatus {
        match self {
            MetricsReport::Success(r) => r.status,
            MetricsReport::Error(r) => r.status,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status() == ReportStatus::Success
    }

    pub fn version(&self) -> &str {
        match self {
            MetricsReport::Success(r) => &r.version,
            MetricsReport::Error(r) => &r.version,
        }
    }
}

impl From<SuccessReport> for MetricsReport {
    fn from(r: SuccessReport) -> Self {
        MetricsReport::Success(r)
    }
}

impl From<ErrorReport> for MetricsReport {
    fn from(r: ErrorReport) -> Self {
        MetricsReport::Error(r)
    }
}

/// Reduce the signal table and elapsed time into the success report.
///
/// `latency_ms` is the floor of `elapsed` in whole milliseconds.
pub fn aggregate(signals: &SignalTable, config: &RunConfig, elapsed: Duration) -> SuccessReport {
    let metrics = SignalMetrics::from_signals(signals);
    SuccessReport {
        version: config.version.clone(),
        rows_processed: metrics.rows_processed,
        metric: METRIC_NAME.to_string(),
        value: round_to(metrics.signal_rate, REPORT_DECIMALS),
        latency_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        seed: config.seed,
        status: ReportStatus::Success,
    }
}
