pub mod ingest;
pub mod synthetic;
pub mod table;

pub use ingest::{load_csv, load_csv_file, InputError, LoadedTable, CLOSE_COLUMN};
pub use synthetic::{generate_ohlcv, write_synthetic_csv, SyntheticBar, SyntheticConfig};
pub use table::{Column, ColumnData, OhlcvTable};
