//! Application state: single-owner, main-thread only.
//!
//! All dashboard state lives here. The worker thread communicates via channels.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;

use trendsignal_core::SignalView;
use trendsignal_runner::{ErrorReport, RunConfig, SuccessReport};

use crate::worker::{WorkerCommand, WorkerResponse};

/// Error history capacity.
pub const MAX_ERRORS: usize = 50;

pub const WINDOW_MIN: usize = 1;
pub const WINDOW_MAX: usize = 50;

/// File written by the sample generator key.
pub const SAMPLE_PATH: &str = "sample_ohlcv.csv";

/// Which form control has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Path,
    Seed,
    Window,
    Version,
}

impl Focus {
    const ORDER: [Focus; 4] = [Focus::Path, Focus::Seed, Focus::Window, Focus::Version];

    pub fn index(self) -> usize {
        match self {
            Focus::Path => 0,
            Focus::Seed => 1,
            Focus::Window => 2,
            Focus::Version => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Focus::Path => "Input file",
            Focus::Seed => "Random seed",
            Focus::Window => "Rolling window",
            Focus::Version => "Version",
        }
    }

    pub fn next(self) -> Focus {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Focus {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Version tags offered by the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionChoice {
    V1,
    V2Beta,
}

impl VersionChoice {
    pub fn tag(self) -> &'static str {
        match self {
            VersionChoice::V1 => "v1",
            VersionChoice::V2Beta => "v2-beta",
        }
    }

    pub fn toggle(self) -> VersionChoice {
        match self {
            VersionChoice::V1 => VersionChoice::V2Beta,
            VersionChoice::V2Beta => VersionChoice::V1,
        }
    }
}

/// Sidebar form values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub path: String,
    pub seed: i64,
    pub window: usize,
    pub version: VersionChoice,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            path: String::new(),
            seed: 42,
            window: 5,
            version: VersionChoice::V1,
        }
    }
}

impl FormState {
    /// Append a decimal digit, keeping the sign. Ignored on overflow.
    pub fn push_seed_digit(&mut self, digit: u32) {
        let d = i64::from(digit);
        let next = self.seed.checked_mul(10).and_then(|s| {
            if self.seed < 0 {
                s.checked_sub(d)
            } else {
                s.checked_add(d)
            }
        });
        if let Some(seed) = next {
            self.seed = seed;
        }
    }

    pub fn pop_seed_digit(&mut self) {
        self.seed /= 10;
    }

    pub fn step_seed(&mut self, delta: i64) {
        self.seed = self.seed.saturating_add(delta);
    }

    pub fn step_window(&mut self, delta: isize) {
        let next = self.window.saturating_add_signed(delta);
        self.window = next.clamp(WINDOW_MIN, WINDOW_MAX);
    }

    /// Build the run config from the form.
    pub fn to_config(&self) -> Result<RunConfig, String> {
        let window = i64::try_from(self.window).map_err(|e| e.to_string())?;
        RunConfig::new(self.seed, window, self.version.tag())
            .map_err(|e| format!("config error: {e}"))
    }
}

/// What the last completed run produced.
#[derive(Debug, Clone)]
pub enum Outcome {
    Success {
        report: SuccessReport,
        view: Box<SignalView>,
    },
    Failed {
        report: ErrorReport,
    },
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An entry of the error history.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub message: String,
    pub context: String,
}

pub struct AppState {
    pub running: bool,
    pub focus: Focus,
    pub form: FormState,
    pub outcome: Option<Outcome>,
    pub busy: bool,
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,

    worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,
}

impl AppState {
    pub fn new(worker_tx: Sender<WorkerCommand>, worker_rx: Receiver<WorkerResponse>) -> Self {
        Self {
            running: true,
            focus: Focus::Path,
            form: FormState::default(),
            outcome: None,
            busy: false,
            status_message: None,
            error_history: VecDeque::with_capacity(MAX_ERRORS),
            worker_tx,
            worker_rx,
        }
    }

    /// Send the form to the worker as a new run.
    pub fn request_run(&mut self) {
        if self.busy {
            self.set_warning("A run is already in progress");
            return;
        }
        let path = self.form.path.trim();
        if path.is_empty() {
            self.set_warning("Enter an input file path first");
            return;
        }
        let config = match self.form.to_config() {
            Ok(config) => config,
            Err(message) => {
                self.push_error(message, "form".into());
                return;
            }
        };
        let cmd = WorkerCommand::Run {
            input: PathBuf::from(path),
            config,
        };
        self.dispatch(cmd, format!("Running on {path}..."));
    }

    /// Ask the worker to write a sample file seeded by the form seed.
    pub fn request_sample(&mut self) {
        if self.busy {
            self.set_warning("A run is already in progress");
            return;
        }
        let cmd = WorkerCommand::GenerateSample {
            path: PathBuf::from(SAMPLE_PATH),
            seed: self.form.seed as u64,
        };
        self.dispatch(cmd, format!("Generating {SAMPLE_PATH}..."));
    }

    fn dispatch(&mut self, cmd: WorkerCommand, status: String) {
        if self.worker_tx.send(cmd).is_err() {
            self.push_error("worker thread is not running".into(), "dispatch".into());
            return;
        }
        self.busy = true;
        self.set_status(status);
    }

    pub fn handle_response(&mut self, resp: WorkerResponse) {
        self.busy = false;
        match resp {
            WorkerResponse::RunComplete { report, view } => {
                self.set_status(format!(
                    "Run complete: {} rows, signal rate {:.4}",
                    report.rows_processed, report.value
                ));
                self.outcome = Some(Outcome::Success { report, view });
            }
            WorkerResponse::RunFailed { report } => {
                let context = self.form.path.clone();
                self.push_error(report.error_message.clone(), context);
                self.outcome = Some(Outcome::Failed { report });
            }
            WorkerResponse::SampleWritten { path, rows } => {
                self.form.path = path.display().to_string();
                self.set_status(format!("Wrote {rows} sample rows to {}", path.display()));
            }
            WorkerResponse::SampleFailed { path, error } => {
                self.push_error(
                    format!("sample generation failed: {error}"),
                    path.display().to_string(),
                );
            }
        }
    }

    /// Push an error to the history, capping at `MAX_ERRORS`.
    pub fn push_error(&mut self, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > MAX_ERRORS {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

#[cfg(test)]
pub(crate) fn test_app() -> (AppState, Receiver<WorkerCommand>) {
    let (cmd_tx, cmd_rx) = std::sync::mpsc::channel();
    let (_resp_tx, resp_rx) = std::sync::mpsc::channel();
    (AppState::new(cmd_tx, resp_rx), cmd_rx)
}
