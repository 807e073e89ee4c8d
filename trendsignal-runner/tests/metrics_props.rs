//! Property tests for metric aggregation and config resolution.

use std::num::NonZeroUsize;
use std::time::Duration;

use proptest::prelude::*;
use trendsignal_core::{generate_signals, Column, ColumnData, OhlcvTable};
use trendsignal_runner::{aggregate, round_to, ConfigError, RunConfig};

fn closes_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e6f64..1.0e6, 1..300)
}

proptest! {
    #[test]
    fn rate_is_rounded_share_of_signal_rows(closes in closes_strategy(), window in 1usize..40) {
        let table = OhlcvTable::from_columns(vec![Column::new(
            "close",
            ColumnData::Float(closes.clone()),
        )])
        .unwrap();
        let signals = generate_signals(table, NonZeroUsize::new(window).unwrap()).unwrap();
        let config = RunConfig::new(7, window as i64, "v1").unwrap();
        let report = aggregate(&signals, &config, Duration::from_millis(3));

        let fired = signals.signal().iter().filter(|&&s| s == 1).count();
        prop_assert_eq!(report.rows_processed, closes.len());
        prop_assert!((0.0..=1.0).contains(&report.value));
        prop_assert_eq!(report.value, round_to(fired as f64 / closes.len() as f64, 4));
        prop_assert_eq!(report.latency_ms, 3);
    }

    #[test]
    fn non_positive_windows_rejected(window in i64::MIN..1) {
        prop_assert_eq!(
            RunConfig::new(0, window, "v1").unwrap_err(),
            ConfigError::InvalidWindow(window)
        );
    }

    #[test]
    fn positive_windows_accepted(window in 1i64..10_000, seed in any::<i64>()) {
        let config = RunConfig::new(seed, window, "v1").unwrap();
        prop_assert_eq!(config.window.get() as i64, window);
        prop_assert_eq!(config.seed, seed);
    }
}
