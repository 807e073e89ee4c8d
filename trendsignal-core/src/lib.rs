//! TrendSignal Core: table model, ingestion, indicators, signal engine.
//!
//! This crate holds everything that touches the data itself:
//! - Column-oriented OHLCV table with per-column type inference
//! - CSV ingestion with format / emptiness / required-column validation
//! - Rolling mean with min-periods = 1 (shrinking window on short history)
//! - Close-vs-mean binary signal
//! - Seeded synthetic OHLCV generator
//!
//! Nothing here performs I/O on its own except the explicit `load_csv_file`
//! and `write_synthetic_csv` helpers.

pub mod data;
pub mod indicators;
pub mod signal;

pub use data::ingest::{load_csv, load_csv_file, InputError, LoadedTable, CLOSE_COLUMN};
pub use data::synthetic::{generate_ohlcv, write_synthetic_csv, SyntheticBar, SyntheticConfig};
pub use data::table::{Column, ColumnData, OhlcvTable};
pub use indicators::RollingMean;
pub use signal::{
    generate_signals, ChartPoint, ComputationError, SignalTable, SignalView, TailRow,
    ROLLING_MEAN_COLUMN, SIGNAL_COLUMN, TIMESTAMP_COLUMN,
};
