//! TrendSignal batch job.
//!
//! Reads a CSV and a TOML config, computes the close-vs-rolling-mean signal,
//! and writes one JSON report to stdout and to `--output`. Exits 0 on success
//! and 1 on any handled failure; the report is written either way.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use trendsignal_runner::{emit, init_file_logging, run_job, ErrorReport, JobPaths, MetricsReport};

#[derive(Parser)]
#[command(
    name = "trendsignal",
    about = "TrendSignal: rolling-mean signal rate over an OHLCV file"
)]
struct Cli {
    /// Input CSV with a header row and a `close` column.
    #[arg(long)]
    input: PathBuf,

    /// TOML config with `seed`, `window` and `version`.
    #[arg(long)]
    config: PathBuf,

    /// Where to write the JSON report.
    #[arg(long)]
    output: PathBuf,

    /// Log file, appended to.
    #[arg(long)]
    log_file: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();

    let guard = match init_file_logging(&cli.log_file) {
        Ok(guard) => guard,
        Err(e) => {
            let report = MetricsReport::Error(ErrorReport::new(None, e.to_string()));
            emit(&report, &cli.output, &mut stdout);
            return ExitCode::FAILURE;
        }
    };

    let paths = JobPaths {
        input: cli.input,
        config: cli.config,
        output: cli.output,
    };
    let outcome = run_job(&paths, &mut stdout);

    // Flush buffered log lines before exit.
    drop(guard);
    ExitCode::from(outcome.exit_code())
}
