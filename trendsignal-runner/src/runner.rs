//! Pipeline runner: wires config, loading, signals, metrics and emission.
//!
//! Two entry points:
//! - `run_job()`: the batch job. Reads config and input from disk, always emits
//!   exactly one report. Used by the CLI.
//! - `evaluate()`: everything after config resolution, returning the signal
//!   table alongside the report. Used by the dashboard and by `run_job()`, so
//!   both surfaces produce the same numbers for the same input.
//!
//! Stages advance strictly in order:
//! `START → CONFIG_RESOLVED → DATA_LOADED → SIGNAL_COMPUTED → METRICS_READY → EMITTED`.
//! A failure in any stage ends the run with an error report; nothing is retried.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;
use tracing::{error, info};

use trendsignal_core::{
    generate_signals, load_csv_file, ComputationError, InputError, LoadedTable, OhlcvTable,
    SignalTable,
};

use crate::config::{ConfigDocument, ConfigError, RunConfig};
use crate::metrics::{aggregate, ErrorReport, MetricsReport, SuccessReport};
use crate::report::{emit, Emission};

/// Errors from the runner. The Display string becomes `error_message`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("input error: {0}")]
    Input(#[from] InputError),
    #[error("computation error: {0}")]
    Computation(#[from] ComputationError),
}

/// Pipeline position of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Start,
    ConfigResolved,
    DataLoaded,
    SignalComputed,
    MetricsReady,
    Emitted,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "START",
            Stage::ConfigResolved => "CONFIG_RESOLVED",
            Stage::DataLoaded => "DATA_LOADED",
            Stage::SignalComputed => "SIGNAL_COMPUTED",
            Stage::MetricsReady => "METRICS_READY",
            Stage::Emitted => "EMITTED",
        };
        f.write_str(name)
    }
}

/// One pipeline instance. Owns the start instant and the stage cursor; holds
/// no state shared with any other run.
#[derive(Debug)]
pub struct Run {
    started: Instant,
    stage: Stage,
    version: Option<String>,
}

impl Run {
    pub fn start() -> Self {
        info!("Job started");
        Self {
            started: Instant::now(),
            stage: Stage::Start,
            version: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The version tag known so far, if any.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    fn advance(&mut self, next: Stage) {
        debug_assert!(next > self.stage, "stage went backwards: {} -> {next}", self.stage);
        self.stage = next;
    }

    /// Resolve a parsed document. The document's version tag is remembered
    /// even when resolution fails.
    pub fn resolve_config(&mut self, document: &ConfigDocument) -> Result<RunConfig, RunError> {
        self.version = document.version_hint().map(str::to_string);
        let config = document.resolve()?;
        self.accept_config(&config);
        Ok(config)
    }

    /// Record a config that was built without a document (dashboard form).
    pub fn accept_config(&mut self, config: &RunConfig) {
        self.version = Some(config.version.clone());
        self.advance(Stage::ConfigResolved);
        info!(
            "Config loaded: seed={}, window={}, version={}",
            config.seed, config.window, config.version
        );
    }

    pub fn load(&mut self, input: &Path) -> Result<LoadedTable, RunError> {
        let loaded = load_csv_file(input)?;
        self.advance(Stage::DataLoaded);
        info!(
            "Data loaded: {} rows, {} columns (fingerprint {})",
            loaded.table.row_count(),
            loaded.table.column_count(),
            loaded.fingerprint
        );
        Ok(loaded)
    }

    pub fn compute(&mut self, table: OhlcvTable, config: &RunConfig) -> Result<SignalTable, RunError> {
        let signals = generate_signals(table, config.window)?;
        self.advance(Stage::SignalComputed);
        info!("Rolling mean calculated with window={}", signals.window());
        info!(
            "Signals generated: {} of {} rows",
            signals.signal_count(),
            signals.row_count()
        );
        Ok(signals)
    }

    pub fn aggregate(&mut self, signals: &SignalTable, config: &RunConfig) -> SuccessReport {
        let report = aggregate(signals, config, self.started.elapsed());
        self.advance(Stage::MetricsReady);
        info!(
            "Metrics: signal_rate={:.4} rows_processed={}",
            report.value, report.rows_processed
        );
        report
    }

    /// Build the error report for `err`, logging the stage it happened in.
    pub fn fail(&self, err: &RunError) -> ErrorReport {
        error!("Job failed at {}: {err}", self.stage);
        ErrorReport::new(self.version(), err.to_string())
    }

    /// Emit the terminal report and close the run.
    pub fn finish<W: Write>(
        mut self,
        report: &MetricsReport,
        artifact: &Path,
        stdout: &mut W,
    ) -> Emission {
        let emission = emit(report, artifact, stdout);
        self.stage = Stage::Emitted;
        if report.is_success() {
            self.log_completion();
        }
        emission
    }

    /// Log successful completion with the wall time so far.
    pub fn log_completion(&self) {
        info!(
            "Job completed successfully in {}ms",
            self.started.elapsed().as_millis()
        );
    }
}

/// Report plus the computed table, for callers that render the data.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub report: SuccessReport,
    pub signals: SignalTable,
}

/// Load → signals → metrics for an already-resolved config.
pub fn evaluate(run: &mut Run, input: &Path, config: &RunConfig) -> Result<Evaluation, RunError> {
    let loaded = run.load(input)?;
    let signals = run.compute(loaded.table, config)?;
    let report = run.aggregate(&signals, config);
    Ok(Evaluation { report, signals })
}

/// File locations for a batch job.
#[derive(Debug, Clone)]
pub struct JobPaths {
    pub input: PathBuf,
    pub config: PathBuf,
    pub output: PathBuf,
}

/// Result of a batch job as seen by the process.
#[derive(Debug, Clone)]
pub struct JobOutcome {
    pub report: MetricsReport,
    pub emission: Emission,
}

impl JobOutcome {
    /// 0 only when the run succeeded and the artifact was written.
    pub fn exit_code(&self) -> u8 {
        if self.report.is_success() && self.emission.persisted {
            0
        } else {
            1
        }
    }
}

/// Run the batch job end to end. Always emits exactly one report.
pub fn run_job<W: Write>(paths: &JobPaths, stdout: &mut W) -> JobOutcome {
    let mut run = Run::start();

    let report = match execute(&mut run, paths) {
        Ok(evaluation) => MetricsReport::Success(evaluation.report),
        Err(err) => MetricsReport::Error(run.fail(&err)),
    };

    let emission = run.finish(&report, &paths.output, stdout);
    JobOutcome { report, emission }
}

fn execute(run: &mut Run, paths: &JobPaths) -> Result<Evaluation, RunError> {
    let document = ConfigDocument::read(&paths.config)?;
    let config = run.resolve_config(&document)?;
    evaluate(run, &paths.input, &config)
}
