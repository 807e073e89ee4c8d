//! Synthetic OHLCV generator: one bar per minute, seeded.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::Parser;
use trendsignal_core::{write_synthetic_csv, SyntheticConfig};

#[derive(Parser)]
#[command(
    name = "trendsignal-gen",
    about = "Write a synthetic OHLCV CSV for TrendSignal"
)]
struct Cli {
    /// Output CSV path.
    #[arg(long)]
    output: PathBuf,

    /// Number of one-minute bars.
    #[arg(long, default_value_t = 10_000)]
    rows: usize,

    /// RNG seed. Same seed, same file.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Timestamp of the first bar (YYYY-MM-DDTHH:MM:SS).
    #[arg(long, default_value = "2024-01-01T00:00:00")]
    start: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let start = NaiveDateTime::parse_from_str(&cli.start, "%Y-%m-%dT%H:%M:%S")
        .with_context(|| format!("invalid --start '{}', expected YYYY-MM-DDTHH:MM:SS", cli.start))?;

    let config = SyntheticConfig {
        rows: cli.rows,
        seed: cli.seed,
        start,
    };

    let written = write_synthetic_csv(&cli.output, &config)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    println!(
        "Generated {written} rows (seed {}) to {}",
        cli.seed,
        cli.output.display()
    );
    Ok(())
}
