//! Column-oriented OHLCV table.
//!
//! Rows are kept in input order (time order). Columns are kept in header order,
//! and each column carries one inferred type for all of its cells.

/// Typed storage for a single column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Int(Vec<i64>),
    /// Empty cells are stored as NaN.
    Float(Vec<f64>),
    Text(Vec<String>),
}

impl ColumnData {
    /// Infer a column type from raw (already trimmed) cells.
    ///
    /// All cells integral → `Int`. All cells numeric or empty → `Float`.
    /// Anything else → `Text`, with cells passed through unmodified.
    pub fn infer(cells: Vec<String>) -> Self {
        if !cells.is_empty() && cells.iter().all(|c| c.parse::<i64>().is_ok()) {
            let values = cells.iter().filter_map(|c| c.parse().ok()).collect();
            return ColumnData::Int(values);
        }

        if cells.iter().all(|c| c.is_empty() || c.parse::<f64>().is_ok()) {
            let values = cells
                .iter()
                .map(|c| c.parse::<f64>().unwrap_or(f64::NAN))
                .collect();
            return ColumnData::Float(values);
        }

        ColumnData::Text(cells)
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Int(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ColumnData::Int(_) => "int",
            ColumnData::Float(_) => "float",
            ColumnData::Text(_) => "text",
        }
    }

    /// Render one cell for display. Returns `None` past the end of the column.
    pub fn display(&self, row: usize) -> Option<String> {
        match self {
            ColumnData::Int(v) => v.get(row).map(|x| x.to_string()),
            ColumnData::Float(v) => v.get(row).map(|x| {
                if x.is_nan() {
                    String::new()
                } else {
                    x.to_string()
                }
            }),
            ColumnData::Text(v) => v.get(row).cloned(),
        }
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// Ordered OHLCV rows stored column by column.
///
/// Invariant: every column holds exactly `row_count` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvTable {
    columns: Vec<Column>,
    row_count: usize,
}

impl OhlcvTable {
    /// Build a table from columns of equal length.
    ///
    /// Returns `None` when the columns disagree on length.
    pub fn from_columns(columns: Vec<Column>) -> Option<Self> {
        let row_count = columns.first().map_or(0, |c| c.data.len());
        if columns.iter().any(|c| c.data.len() != row_count) {
            return None;
        }
        Some(Self { columns, row_count })
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Case-sensitive lookup. Duplicate names resolve to the first match.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Drop every column with the given name, keeping the order of the rest.
    pub(crate) fn remove_column(&mut self, name: &str) {
        self.columns.retain(|c| c.name != name);
    }
}
