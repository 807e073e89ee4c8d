//! Background worker thread. Pipeline runs and sample generation happen here
//! so the render loop never blocks.
//!
//! Communication with the main thread is via `mpsc` channels. Each `Run`
//! command is an independent pipeline instance with its own config.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use trendsignal_core::{write_synthetic_csv, SignalView, SyntheticConfig};
use trendsignal_runner::{evaluate, ErrorReport, Run, RunConfig, SuccessReport};

/// Rows plotted in the chart.
pub const CHART_ROWS: usize = 200;

/// Rows listed in the tail table.
pub const TAIL_ROWS: usize = 15;

/// Rows in a generated sample file.
pub const SAMPLE_ROWS: usize = 10_000;

/// Commands sent from the UI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    Run { input: PathBuf, config: RunConfig },
    GenerateSample { path: PathBuf, seed: u64 },
    Shutdown,
}

/// Responses sent from the worker back to the UI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    RunComplete {
        report: SuccessReport,
        view: Box<SignalView>,
    },
    RunFailed {
        report: ErrorReport,
    },
    SampleWritten {
        path: PathBuf,
        rows: usize,
    },
    SampleFailed {
        path: PathBuf,
        error: String,
    },
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("trendsignal-worker".into())
        .spawn(move || worker_loop(rx, tx))
}

fn worker_loop(rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(cmd) => {
                let resp = handle_command(cmd);
                if let Some(resp) = resp {
                    if tx.send(resp).is_err() {
                        break;
                    }
                }
            }
        }
    }
}

fn handle_command(cmd: WorkerCommand) -> Option<WorkerResponse> {
    match cmd {
        WorkerCommand::Run { input, config } => Some(run_pipeline(&input, &config)),
        WorkerCommand::GenerateSample { path, seed } => Some(generate_sample(path, seed)),
        WorkerCommand::Shutdown => None,
    }
}

/// Same stages as the batch job, minus persistence.
pub fn run_pipeline(input: &Path, config: &RunConfig) -> WorkerResponse {
    let mut run = Run::start();
    run.accept_config(config);

    match evaluate(&mut run, input, config) {
        Ok(evaluation) => {
            run.log_completion();
            WorkerResponse::RunComplete {
                report: evaluation.report,
                view: Box::new(evaluation.signals.view(CHART_ROWS, TAIL_ROWS)),
            }
        }
        Err(err) => WorkerResponse::RunFailed {
            report: run.fail(&err),
        },
    }
}

fn generate_sample(path: PathBuf, seed: u64) -> WorkerResponse {
    let config = SyntheticConfig {
        rows: SAMPLE_ROWS,
        seed,
        ..SyntheticConfig::default()
    };
    match write_synthetic_csv(&path, &config) {
        Ok(rows) => {
            tracing::info!("Sample data written: {rows} rows to {}", path.display());
            WorkerResponse::SampleWritten { path, rows }
        }
        Err(e) => {
            tracing::error!("Sample generation failed for {}: {e}", path.display());
            WorkerResponse::SampleFailed {
                path,
                error: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn pipeline_success_projects_view() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.csv");
        std::fs::write(&input, "close\n10\n12\n9\n15\n15\n").unwrap();

        let config = RunConfig::new(42, 3, "v1").unwrap();
        match run_pipeline(&input, &config) {
            WorkerResponse::RunComplete { report, view } => {
                assert_eq!(report.value, 0.6);
                assert_eq!(view.chart.len(), 5);
                assert_eq!(view.tail.len(), 5);
                assert!(!view.has_timestamp);
            }
            other => panic!("expected RunComplete, got {other:?}"),
        }
    }

    #[test]
    fn pipeline_failure_keeps_form_version() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.csv");
        std::fs::write(&input, "open\n1\n").unwrap();

        let config = RunConfig::new(42, 3, "v2-beta").unwrap();
        match run_pipeline(&input, &config) {
            WorkerResponse::RunFailed { report } => {
                assert_eq!(report.version, "v2-beta");
                assert!(report.error_message.contains("close"));
            }
            other => panic!("expected RunFailed, got {other:?}"),
        }
    }

    #[test]
    fn worker_round_trip_over_channels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.csv");

        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let handle = spawn_worker(cmd_rx, resp_tx).unwrap();

        cmd_tx
            .send(WorkerCommand::GenerateSample {
                path: path.clone(),
                seed: 7,
            })
            .unwrap();
        match resp_rx.recv().unwrap() {
            WorkerResponse::SampleWritten { rows, .. } => assert_eq!(rows, SAMPLE_ROWS),
            other => panic!("expected SampleWritten, got {other:?}"),
        }

        cmd_tx
            .send(WorkerCommand::Run {
                input: path,
                config: RunConfig::new(7, 20, "v1").unwrap(),
            })
            .unwrap();
        match resp_rx.recv().unwrap() {
            WorkerResponse::RunComplete { report, view } => {
                assert_eq!(report.rows_processed, SAMPLE_ROWS);
                assert_eq!(view.chart.len(), CHART_ROWS);
                assert_eq!(view.tail.len(), TAIL_ROWS);
                assert!(view.has_timestamp);
            }
            other => panic!("expected RunComplete, got {other:?}"),
        }

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }
}
