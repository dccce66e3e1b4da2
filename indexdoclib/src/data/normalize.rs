//! Normalization: fill, coerce and group raw rows.
//!
//! Rows that share a grouping-key value describe the same index entry, so they
//! are merged into one row. Every other column's values are joined in input
//! order: with a newline for ordinary columns, with a single space for
//! free-text notes columns.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cell::RawTable;
use super::table::Table;
use crate::error::IndexError;
use crate::Result;

/// Separator for ordinary grouped columns.
pub const LINE_SEPARATOR: &str = "\n";

/// Separator for notes columns.
pub const NOTES_SEPARATOR: &str = " ";

/// Column conventionally holding free-text notes.
pub const DEFAULT_NOTES_COLUMN: &str = "Notes";

/// Options for grouping rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// Grouping key column (first column when `None`)
    pub group_key: Option<String>,
    /// Columns whose grouped values are joined with a space
    pub notes_columns: Vec<String>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            group_key: None,
            notes_columns: vec![DEFAULT_NOTES_COLUMN.to_string()],
        }
    }
}

impl NormalizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the grouping key column.
    pub fn group_key(mut self, column: impl Into<String>) -> Self {
        self.group_key = Some(column.into());
        self
    }

    /// Builder: replace the notes columns.
    pub fn notes_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.notes_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    fn separator_for(&self, column: &str) -> &'static str {
        if self.notes_columns.iter().any(|c| c == column) {
            NOTES_SEPARATOR
        } else {
            LINE_SEPARATOR
        }
    }
}

/// Coerce every raw cell to text (missing cells become `""`) and group rows.
pub fn normalize(raw: &RawTable, options: &NormalizeOptions) -> Result<Table> {
    let mut table = Table::new(raw.columns.clone());
    for record in &raw.records {
        table.push_record(record.iter().map(|cell| cell.to_text()).collect());
    }
    group_rows(&table, options)
}

/// Merge rows sharing the same grouping-key value.
///
/// Groups come out in first-appearance order of their key. Grouping a table
/// that already has one row per key returns it unchanged.
pub fn group_rows(table: &Table, options: &NormalizeOptions) -> Result<Table> {
    if table.columns().is_empty() {
        return Err(IndexError::missing_column(
            options.group_key.as_deref().unwrap_or("<first column>"),
            table.columns(),
        ));
    }
    let key = table.key_column(options.group_key.as_deref())?;

    let mut groups: IndexMap<&str, Vec<Vec<&str>>> = IndexMap::new();
    for row in table.rows() {
        let key_value = row.get(key).unwrap_or_default();
        let columns = groups
            .entry(key_value)
            .or_insert_with(|| vec![Vec::new(); table.columns().len()]);
        for (values, value) in columns.iter_mut().zip(row.values()) {
            values.push(value);
        }
    }

    let mut grouped = Table::new(table.columns().to_vec());
    for (key_value, columns) in &groups {
        let record = table
            .columns()
            .iter()
            .zip(columns)
            .map(|(column, values)| {
                if column == key {
                    key_value.to_string()
                } else {
                    values.join(options.separator_for(column))
                }
            })
            .collect();
        grouped.push_record(record);
    }

    debug!(
        key,
        input_rows = table.len(),
        grouped_rows = grouped.len(),
        "grouped rows"
    );
    Ok(grouped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::cell::CellValue;

    fn topics() -> Table {
        Table::from_records(
            ["Topic", "Book", "Page", "Notes"],
            [
                vec!["Loops", "1", "12", "see ch.2"],
                vec!["Arrays", "1", "30", ""],
                vec!["Loops", "2", "7", "see ch.5"],
            ],
        )
    }

    #[test]
    fn test_groups_by_first_column() {
        let grouped = group_rows(&topics(), &NormalizeOptions::new()).unwrap();

        assert_eq!(grouped.len(), 2);
        let loops = &grouped.rows()[0];
        assert_eq!(loops.get("Topic"), Some("Loops"));
        assert_eq!(loops.get("Book"), Some("1\n2"));
        assert_eq!(loops.get("Page"), Some("12\n7"));
        assert_eq!(loops.get("Notes"), Some("see ch.2 see ch.5"));
    }

    #[test]
    fn test_first_appearance_order() {
        let grouped = group_rows(&topics(), &NormalizeOptions::new()).unwrap();
        let keys: Vec<&str> = grouped
            .rows()
            .iter()
            .filter_map(|r| r.get("Topic"))
            .collect();
        assert_eq!(keys, vec!["Loops", "Arrays"]);
    }

    #[test]
    fn test_custom_notes_columns() {
        let options = NormalizeOptions::new().notes_columns(["Page"]);
        let grouped = group_rows(&topics(), &options).unwrap();
        assert_eq!(grouped.rows()[0].get("Page"), Some("12 7"));
        assert_eq!(grouped.rows()[0].get("Notes"), Some("see ch.2\nsee ch.5"));
    }

    #[test]
    fn test_group_by_other_column() {
        let grouped = group_rows(&topics(), &NormalizeOptions::new().group_key("Book")).unwrap();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped.rows()[0].get("Topic"), Some("Loops\nArrays"));
        assert_eq!(grouped.columns(), topics().columns());
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let options = NormalizeOptions::new();
        let once = group_rows(&topics(), &options).unwrap();
        let twice = group_rows(&once, &options).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_missing_group_key() {
        let err = group_rows(&topics(), &NormalizeOptions::new().group_key("Chapter")).unwrap_err();
        assert!(matches!(err, IndexError::MissingColumn { .. }));
    }

    #[test]
    fn test_zero_columns_is_missing_column() {
        let err = group_rows(&Table::new(vec![]), &NormalizeOptions::new()).unwrap_err();
        assert!(matches!(err, IndexError::MissingColumn { .. }));
    }

    #[test]
    fn test_normalize_fills_and_coerces() {
        let raw = RawTable::new(vec!["Topic".into(), "Page".into(), "Notes".into()])
            .with_record([CellValue::from("Loops"), CellValue::Float(12.0), CellValue::Empty])
            .with_record([CellValue::from("Loops"), CellValue::Int(40), "tricky".into()]);

        let table = normalize(&raw, &NormalizeOptions::new()).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].get("Page"), Some("12\n40"));
        assert_eq!(table.rows()[0].get("Notes"), Some(" tricky"));
    }

    #[test]
    fn test_blank_keys_group_together() {
        let table = Table::from_records(["Topic", "Page"], [vec!["", "1"], vec!["", "2"]]);
        let grouped = group_rows(&table, &NormalizeOptions::new()).unwrap();
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped.rows()[0].get("Page"), Some("1\n2"));
    }
}
