//! Raw spreadsheet cells and the untyped table they arrive in.

use serde::{Deserialize, Serialize};

/// A single cell as read from the input, before coercion to text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum CellValue {
    /// Blank or missing cell
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Date/time already formatted as `YYYY-MM-DD HH:MM:SS`
    DateTime(String),
    /// Spreadsheet error literal such as `#DIV/0!`
    Error(String),
}

impl CellValue {
    /// Whether the cell carries no content at all.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Coerce the cell to text. Missing cells become an empty string.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) | CellValue::DateTime(s) | CellValue::Error(s) => s.clone(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => format_float(*f),
            CellValue::Bool(true) => "True".to_string(),
            CellValue::Bool(false) => "False".to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

/// Spreadsheets store page numbers as floats; print `12.0` as `12`.
fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// Header row plus records of raw cells.
///
/// Records always have exactly one cell per column: [`RawTable::push_record`]
/// pads short records with [`CellValue::Empty`] and truncates long ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub records: Vec<Vec<CellValue>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            records: Vec::new(),
        }
    }

    /// Append a record, fitting it to the header width.
    pub fn push_record(&mut self, mut record: Vec<CellValue>) {
        record.resize(self.columns.len(), CellValue::Empty);
        self.records.push(record);
    }

    /// Builder: append a record.
    pub fn with_record<I, V>(mut self, record: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        self.push_record(record.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.records.is_empty()
    }
}
