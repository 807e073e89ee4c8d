//! Seeded synthetic OHLCV generator.
//!
//! Produces minute bars around a 40k price level. The generator is the only
//! seeded component in the workspace: the seed is passed in explicitly and
//! never installed globally, so identical seeds give identical files.

use std::path::Path;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::Serialize;

/// Timestamp format used in generated files.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Generator parameters.
#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    pub rows: usize,
    pub seed: u64,
    pub start: NaiveDateTime,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            rows: 10_000,
            seed: 42,
            start: NaiveDate::from_ymd_opt(2024, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap_or_default(),
        }
    }
}

/// One generated row, in output column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyntheticBar {
    pub timestamp: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume_btc: f64,
    pub volume_usd: f64,
}

/// Generate `config.rows` minute bars.
pub fn generate_ohlcv(config: &SyntheticConfig) -> Vec<SyntheticBar> {
    let mut rng = StdRng::seed_from_u64(config.seed);

    (0..config.rows)
        .map(|i| {
            let close = normal(&mut rng, 40_000.0, 500.0);
            let open = close + normal(&mut rng, 0.0, 50.0);
            let high = close + normal(&mut rng, 50.0, 20.0);
            let low = close - normal(&mut rng, 50.0, 20.0);
            let volume_btc = rng.gen_range(1.0..10.0);
            let volume_usd = rng.gen_range(40_000.0..400_000.0);
            let ts = config.start + Duration::minutes(i as i64);

            SyntheticBar {
                timestamp: ts.format(TIMESTAMP_FORMAT).to_string(),
                open,
                high,
                low,
                close,
                volume_btc,
                volume_usd,
            }
        })
        .collect()
}

fn normal(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    mean + std_dev * z
}

/// Generate bars and write them as CSV with a header row.
pub fn write_synthetic_csv(path: &Path, config: &SyntheticConfig) -> Result<usize, csv::Error> {
    let bars = generate_ohlcv(config);
    let mut writer = csv::Writer::from_path(path)?;
    for bar in &bars {
        writer.serialize(bar)?;
    }
    writer.flush()?;
    Ok(bars.len())
}
