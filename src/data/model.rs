use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Cell spellings treated as missing regardless of the column type.
pub const NA_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

/// Whether a raw cell is a missing value.
pub fn is_missing(raw: &str) -> bool {
    NA_MARKERS.contains(&raw.trim())
}

// ---------------------------------------------------------------------------
// ColumnKind / ColumnData – the type tag decided once at parse time
// ---------------------------------------------------------------------------

/// Inferred type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Date,
    Text,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Date => write!(f, "date"),
            ColumnKind::Text => write!(f, "text"),
        }
    }
}

/// Typed values of a column. `None` marks a missing cell.
///
/// Text columns carry no extra payload: their values are the raw cells.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Date(Vec<Option<NaiveDate>>),
    Text,
}

// ---------------------------------------------------------------------------
// CellValue – a single typed cell, borrowed from its column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    Number(f64),
    Date(NaiveDate),
    Text(&'a str),
    Missing,
}

impl fmt::Display for CellValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Missing => write!(f, "<null>"),
        }
    }
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

/// One named column: raw cell text plus its typed interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    raw: Vec<String>,
    data: ColumnData,
}

impl Column {
    pub(crate) fn new(name: String, raw: Vec<String>, data: ColumnData) -> Self {
        debug_assert!(match &data {
            ColumnData::Numeric(v) => v.len() == raw.len(),
            ColumnData::Date(v) => v.len() == raw.len(),
            ColumnData::Text => true,
        });
        Column { name, raw, data }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        match self.data {
            ColumnData::Numeric(_) => ColumnKind::Numeric,
            ColumnData::Date(_) => ColumnKind::Date,
            ColumnData::Text => ColumnKind::Text,
        }
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// The cell exactly as it appeared in the source CSV.
    pub fn raw(&self, row: usize) -> &str {
        &self.raw[row]
    }

    /// Typed value at `row`.
    pub fn value(&self, row: usize) -> CellValue<'_> {
        match &self.data {
            ColumnData::Numeric(values) => values[row].map_or(CellValue::Missing, CellValue::Number),
            ColumnData::Date(values) => values[row].map_or(CellValue::Missing, CellValue::Date),
            ColumnData::Text => {
                let raw = &self.raw[row];
                if is_missing(raw) {
                    CellValue::Missing
                } else {
                    CellValue::Text(raw)
                }
            }
        }
    }

    /// Numeric value at `row`; `None` for missing cells and non-numeric columns.
    pub fn number(&self, row: usize) -> Option<f64> {
        match &self.data {
            ColumnData::Numeric(values) => values[row],
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the complete parsed upload
// ---------------------------------------------------------------------------

/// An immutable parsed table. All columns have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    pub(crate) fn from_columns(columns: Vec<Column>, row_count: usize) -> Self {
        debug_assert!(columns.iter().all(|c| c.len() == row_count));
        Table { columns, row_count }
    }

    /// Columns in header order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name())
    }

    /// Names of the columns a threshold filter can be applied to.
    pub fn numeric_column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.kind() == ColumnKind::Numeric)
            .map(|c| c.name())
            .collect()
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Raw cells of one row in column order.
    pub fn raw_row(&self, row: usize) -> Vec<&str> {
        self.columns.iter().map(|c| c.raw(row)).collect()
    }
}
