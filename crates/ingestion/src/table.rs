//! Raw tabular input.
//!
//! No fixed wire format is mandated for raw market data; `RawTable` is the
//! common shape any source adapter produces before validation runs.

use ohlcv_core::{Error, Result};
use std::io::Read;

/// One raw cell value, prior to any coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Unparsed text.
    Text(String),
    /// A floating-point number.
    Float(f64),
    /// An integer (e.g., an epoch timestamp).
    Int(i64),
    /// Missing value.
    Null,
}

impl RawValue {
    /// Coerce to f64 if possible. Text is parsed; `Null` and unparseable
    /// text yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Float(f) => Some(*f),
            RawValue::Int(i) => Some(*i as f64),
            RawValue::Text(s) => s.trim().parse::<f64>().ok(),
            RawValue::Null => None,
        }
    }
}

/// A raw table: named columns and row-major values, exactly as delivered by
/// the market data source.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<RawValue>>,
}

impl RawTable {
    /// Create an empty table with the given column names.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row. Fails if the row width does not match the header.
    pub fn push_row(&mut self, row: Vec<RawValue>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::other(format!(
                "row has {} values, expected {}",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Column names as delivered (not normalized).
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows in delivery order.
    pub fn rows(&self) -> &[Vec<RawValue>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has zero rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first column whose normalized name matches
    /// `normalized`, which must itself already be normalized.
    pub fn column_index(&self, normalized: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| normalize_column_name(c) == normalized)
    }

    /// Read a table from CSV with a header row. Numeric-looking cells
    /// become `Float`, empty cells `Null`, everything else `Text`.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<RawTable> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns: Vec<String> = csv_reader
            .headers()
            .map_err(|e| Error::other(format!("CSV header error: {e}")))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut table = RawTable::new(columns);
        for record in csv_reader.records() {
            let record = record.map_err(|e| Error::other(format!("CSV record error: {e}")))?;
            let row = record
                .iter()
                .map(|cell| {
                    if cell.is_empty() {
                        RawValue::Null
                    } else if let Ok(f) = cell.parse::<f64>() {
                        RawValue::Float(f)
                    } else {
                        RawValue::Text(cell.to_string())
                    }
                })
                .collect();
            table.push_row(row)?;
        }
        Ok(table)
    }
}

/// Normalize a column name: lowercase, surrounding whitespace stripped,
/// interior spaces replaced with underscores.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}
