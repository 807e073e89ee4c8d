//! Signal engine: rolling mean of `close` and the close-vs-mean binary signal.
//!
//! `signal[i] = 1` iff `close[i] > rolling_mean[i]`, strictly. Ties, NaN closes
//! and NaN means all yield 0.

use std::num::NonZeroUsize;

use thiserror::Error;

use crate::data::ingest::CLOSE_COLUMN;
use crate::data::table::{Column, ColumnData, OhlcvTable};
use crate::indicators::RollingMean;

pub const ROLLING_MEAN_COLUMN: &str = "rolling_mean";
pub const SIGNAL_COLUMN: &str = "signal";
pub const TIMESTAMP_COLUMN: &str = "timestamp";

/// Errors raised while computing signals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComputationError {
    #[error("column '{column}' is not numeric (row {row}: '{value}')")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },

    #[error("column '{0}' not found")]
    MissingColumn(String),
}

/// The input table with `rolling_mean` and `signal` appended.
///
/// Input columns that already used either name are replaced, so the appended
/// columns are always the last two.
#[derive(Debug, Clone)]
pub struct SignalTable {
    base: OhlcvTable,
    window: NonZeroUsize,
    close: Vec<f64>,
    rolling_mean: Vec<f64>,
    signal: Vec<u8>,
}

/// Compute the rolling mean and signal columns for `table`.
pub fn generate_signals(
    mut table: OhlcvTable,
    window: NonZeroUsize,
) -> Result<SignalTable, ComputationError> {
    let close = numeric_column(&table, CLOSE_COLUMN)?;
    let rolling_mean = RollingMean::new(window).compute(&close);

    let signal = close
        .iter()
        .zip(&rolling_mean)
        .map(|(c, m)| u8::from(c > m))
        .collect();

    table.remove_column(ROLLING_MEAN_COLUMN);
    table.remove_column(SIGNAL_COLUMN);

    Ok(SignalTable {
        base: table,
        window,
        close,
        rolling_mean,
        signal,
    })
}

fn numeric_column(table: &OhlcvTable, name: &str) -> Result<Vec<f64>, ComputationError> {
    let column = table
        .column(name)
        .ok_or_else(|| ComputationError::MissingColumn(name.to_string()))?;

    match &column.data {
        ColumnData::Float(v) => Ok(v.clone()),
        ColumnData::Int(v) => Ok(v.iter().map(|&x| x as f64).collect()),
        ColumnData::Text(cells) => {
            let (row, value) = cells
                .iter()
                .enumerate()
                .find(|(_, c)| !c.is_empty() && c.parse::<f64>().is_err())
                .map(|(i, c)| (i, c.clone()))
                .unwrap_or_default();
            Err(ComputationError::NonNumeric {
                column: name.to_string(),
                row,
                value,
            })
        }
    }
}

impl SignalTable {
    pub fn row_count(&self) -> usize {
        self.close.len()
    }

    pub fn window(&self) -> usize {
        self.window.get()
    }

    pub fn close(&self) -> &[f64] {
        &self.close
    }

    pub fn rolling_mean(&self) -> &[f64] {
        &self.rolling_mean
    }

    pub fn signal(&self) -> &[u8] {
        &self.signal
    }

    pub fn signal_count(&self) -> usize {
        self.signal.iter().filter(|&&s| s == 1).count()
    }

    /// Input columns in original order, followed by the two computed columns.
    pub fn column_names(&self) -> Vec<&str> {
        let mut names = self.base.column_names();
        names.push(ROLLING_MEAN_COLUMN);
        names.push(SIGNAL_COLUMN);
        names
    }

    /// Materialize the augmented table.
    pub fn into_table(self) -> OhlcvTable {
        let mut columns = self.base.columns().to_vec();
        columns.push(Column::new(
            ROLLING_MEAN_COLUMN,
            ColumnData::Float(self.rolling_mean),
        ));
        columns.push(Column::new(
            SIGNAL_COLUMN,
            ColumnData::Int(self.signal.into_iter().map(i64::from).collect()),
        ));
        // All columns share the base row count by construction.
        OhlcvTable::from_columns(columns).unwrap_or(self.base)
    }

    /// Project the trailing rows used by the dashboard: `chart_rows` points of
    /// close vs mean, and `tail_rows` rows of timestamp/close/mean/signal.
    pub fn view(&self, chart_rows: usize, tail_rows: usize) -> SignalView {
        let n = self.row_count();
        let timestamps = self.base.column(TIMESTAMP_COLUMN).map(|c| &c.data);

        let chart = (n.saturating_sub(chart_rows)..n)
            .map(|i| ChartPoint {
                index: i,
                close: self.close[i],
                rolling_mean: self.rolling_mean[i],
            })
            .collect();

        let tail = (n.saturating_sub(tail_rows)..n)
            .map(|i| TailRow {
                index: i,
                timestamp: timestamps.and_then(|t| t.display(i)),
                close: self.close[i],
                rolling_mean: self.rolling_mean[i],
                signal: self.signal[i],
            })
            .collect();

        SignalView {
            chart,
            tail,
            has_timestamp: timestamps.is_some(),
        }
    }
}

/// One chart sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub index: usize,
    pub close: f64,
    pub rolling_mean: f64,
}

/// One table row of the trailing projection.
#[derive(Debug, Clone, PartialEq)]
pub struct TailRow {
    pub index: usize,
    pub timestamp: Option<String>,
    pub close: f64,
    pub rolling_mean: f64,
    pub signal: u8,
}

/// Trailing projection of a `SignalTable`.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalView {
    pub chart: Vec<ChartPoint>,
    pub tail: Vec<TailRow>,
    pub has_timestamp: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn close_table(closes: &[f64]) -> OhlcvTable {
        OhlcvTable::from_columns(vec![Column::new(
            "close",
            ColumnData::Float(closes.to_vec()),
        )])
        .unwrap()
    }

    #[test]
    fn reference_scenario() {
        let table = close_table(&[10.0, 12.0, 9.0, 15.0, 15.0]);
        let signals = generate_signals(table, window(3)).unwrap();
        assert_eq!(signals.signal(), &[0, 1, 0, 1, 1]);
        assert_eq!(signals.signal_count(), 3);
    }

    #[test]
    fn tie_yields_zero() {
        let table = close_table(&[5.0, 5.0, 5.0]);
        let signals = generate_signals(table, window(2)).unwrap();
        assert_eq!(signals.signal(), &[0, 0, 0]);
    }

    #[test]
    fn nan_close_yields_zero() {
        let table = close_table(&[5.0, f64::NAN, 9.0]);
        let signals = generate_signals(table, window(2)).unwrap();
        assert_eq!(signals.signal(), &[0, 0, 0]);
        assert_eq!(signals.rolling_mean()[1], 5.0);
    }

    #[test]
    fn int_close_is_widened() {
        let table = OhlcvTable::from_columns(vec![Column::new(
            "close",
            ColumnData::Int(vec![1, 3]),
        )])
        .unwrap();
        let signals = generate_signals(table, window(2)).unwrap();
        assert_eq!(signals.rolling_mean(), &[1.0, 2.0]);
        assert_eq!(signals.signal(), &[0, 1]);
    }

    #[test]
    fn text_close_is_computation_error() {
        let table = OhlcvTable::from_columns(vec![Column::new(
            "close",
            ColumnData::Text(vec!["1.0".into(), "".into(), "n/a".into()]),
        )])
        .unwrap();
        let err = generate_signals(table, window(2)).unwrap_err();
        assert_eq!(
            err,
            ComputationError::NonNumeric {
                column: "close".into(),
                row: 2,
                value: "n/a".into(),
            }
        );
    }

    #[test]
    fn missing_close_is_computation_error() {
        let table = OhlcvTable::from_columns(vec![Column::new(
            "open",
            ColumnData::Float(vec![1.0]),
        )])
        .unwrap();
        assert_eq!(
            generate_signals(table, window(1)).unwrap_err(),
            ComputationError::MissingColumn("close".into())
        );
    }

    #[test]
    fn existing_computed_columns_are_replaced() {
        let table = OhlcvTable::from_columns(vec![
            Column::new("signal", ColumnData::Int(vec![9, 9])),
            Column::new("close", ColumnData::Float(vec![1.0, 2.0])),
        ])
        .unwrap();
        let signals = generate_signals(table, window(2)).unwrap();
        assert_eq!(signals.column_names(), vec!["close", "rolling_mean", "signal"]);

        let table = signals.into_table();
        assert_eq!(table.column_count(), 3);
        assert_eq!(
            table.column("signal").unwrap().data,
            ColumnData::Int(vec![0, 1])
        );
    }

    #[test]
    fn view_caps_chart_and_tail() {
        let closes: Vec<f64> = (0..250).map(|i| i as f64).collect();
        let signals = generate_signals(close_table(&closes), window(5)).unwrap();
        let view = signals.view(200, 15);

        assert_eq!(view.chart.len(), 200);
        assert_eq!(view.chart[0].index, 50);
        assert_eq!(view.tail.len(), 15);
        assert_eq!(view.tail[14].index, 249);
        assert!(!view.has_timestamp);
        assert!(view.tail.iter().all(|r| r.timestamp.is_none()));
    }

    #[test]
    fn view_on_short_table_returns_everything() {
        let signals = generate_signals(close_table(&[1.0, 2.0, 3.0]), window(2)).unwrap();
        let view = signals.view(200, 15);
        assert_eq!(view.chart.len(), 3);
        assert_eq!(view.tail.len(), 3);
    }

    #[test]
    fn view_includes_timestamp_when_present() {
        let table = OhlcvTable::from_columns(vec![
            Column::new(
                "timestamp",
                ColumnData::Text(vec!["t0".into(), "t1".into()]),
            ),
            Column::new("close", ColumnData::Float(vec![1.0, 2.0])),
        ])
        .unwrap();
        let view = generate_signals(table, window(2)).unwrap().view(200, 15);
        assert!(view.has_timestamp);
        assert_eq!(view.tail[1].timestamp.as_deref(), Some("t1"));
    }
}
