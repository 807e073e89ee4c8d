//! Property tests for signal engine invariants.
//!
//! Uses proptest to verify:
//! 1. Shrinking window: rows before `window-1` average the full history so far
//! 2. Full window: later rows average exactly the last `window` closes
//! 3. Strict signal: 1 iff close > rolling mean
//! 4. Window 1: rolling mean equals close, so no signal ever fires
//! 5. Parallel and sequential rolling means are bit-identical
//! 6. Long windows (sliding sums) stay within rounding of the exact mean

use proptest::prelude::*;
use std::num::NonZeroUsize;
use trendsignal_core::{generate_signals, Column, ColumnData, OhlcvTable, RollingMean};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_closes() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(
        (1.0..1000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0),
        1..120,
    )
}

fn arb_window() -> impl Strategy<Value = usize> {
    1usize..40
}

fn table(closes: &[f64]) -> OhlcvTable {
    OhlcvTable::from_columns(vec![Column::new(
        "close",
        ColumnData::Float(closes.to_vec()),
    )])
    .unwrap()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn nz(w: usize) -> NonZeroUsize {
    NonZeroUsize::new(w).unwrap()
}

proptest! {
    #[test]
    fn shrinking_window_uses_all_history(closes in arb_closes(), w in arb_window()) {
        let rm = RollingMean::new(nz(w)).compute(&closes);
        for i in 0..closes.len().min(w.saturating_sub(1)) {
            prop_assert_eq!(rm[i].to_bits(), mean(&closes[..=i]).to_bits());
        }
    }

    #[test]
    fn full_window_uses_exactly_w_closes(closes in arb_closes(), w in arb_window()) {
        let rm = RollingMean::new(nz(w)).compute(&closes);
        for i in (w - 1)..closes.len() {
            prop_assert_eq!(rm[i].to_bits(), mean(&closes[i + 1 - w..=i]).to_bits());
        }
    }

    #[test]
    fn signal_is_strict_comparison(closes in arb_closes(), w in arb_window()) {
        let signals = generate_signals(table(&closes), nz(w)).unwrap();
        for i in 0..closes.len() {
            let expected = u8::from(signals.close()[i] > signals.rolling_mean()[i]);
            prop_assert_eq!(signals.signal()[i], expected);
        }
    }

    #[test]
    fn window_one_never_signals(closes in arb_closes()) {
        let signals = generate_signals(table(&closes), nz(1)).unwrap();
        prop_assert_eq!(signals.rolling_mean(), &closes[..]);
        prop_assert!(signals.signal().iter().all(|&s| s == 0));
    }

    #[test]
    fn parallel_matches_sequential_bitwise(closes in arb_closes(), w in arb_window()) {
        let rm = RollingMean::new(nz(w));
        let seq: Vec<u64> = rm.compute_sequential(&closes).iter().map(|v| v.to_bits()).collect();
        let par: Vec<u64> = rm.compute_parallel(&closes).iter().map(|v| v.to_bits()).collect();
        prop_assert_eq!(seq, par);
    }

    #[test]
    fn long_window_tracks_exact_mean(
        closes in prop::collection::vec(
            (1.0..1000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0),
            1..3000,
        ),
        w in 513usize..2000,
    ) {
        let rm = RollingMean::new(nz(w));
        let seq = rm.compute_sequential(&closes);
        let par = rm.compute_parallel(&closes);
        for i in 0..closes.len() {
            let expected = mean(&closes[(i + 1).saturating_sub(w)..=i]);
            prop_assert!((seq[i] - expected).abs() <= expected * 1e-10);
            prop_assert_eq!(seq[i].to_bits(), par[i].to_bits());
        }
    }

    #[test]
    fn row_order_and_count_preserved(closes in arb_closes(), w in arb_window()) {
        let signals = generate_signals(table(&closes), nz(w)).unwrap();
        prop_assert_eq!(signals.row_count(), closes.len());
        prop_assert_eq!(signals.close(), &closes[..]);
    }
}
