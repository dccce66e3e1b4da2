//! Text-only tables: the shape every stage after loading works on.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::IndexError;
use crate::Result;

/// One row of text values, keyed by column name in table column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    cells: IndexMap<String, String>,
}

impl Row {
    /// Value for `column`, if the row has that column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// Values in column order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.values().map(String::as_str)
    }

    /// `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Ordered column names plus rows that all carry exactly those columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from string records; short records are padded with `""`.
    pub fn from_records<C, R, S>(columns: C, records: R) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Table::new(columns.into_iter().map(Into::into).collect());
        for record in records {
            table.push_record(record.into_iter().map(Into::into).collect());
        }
        table
    }

    /// Append a record given as values in column order.
    pub fn push_record(&mut self, values: Vec<String>) {
        let mut values = values.into_iter();
        let cells = self
            .columns
            .iter()
            .map(|column| (column.clone(), values.next().unwrap_or_default()))
            .collect();
        self.rows.push(Row { cells });
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Return `column` if it exists, otherwise a `MissingColumn` error.
    pub fn require_column<'a>(&self, column: &'a str) -> Result<&'a str> {
        if self.has_column(column) {
            Ok(column)
        } else {
            Err(IndexError::missing_column(column, &self.columns))
        }
    }

    /// Resolve an optional key column, falling back to the first column.
    pub fn key_column<'a>(&'a self, requested: Option<&'a str>) -> Result<&'a str> {
        match requested.filter(|c| !c.is_empty()) {
            Some(column) => self.require_column(column),
            None => self
                .columns
                .first()
                .map(String::as_str)
                .ok_or_else(|| IndexError::missing_column("<first column>", &self.columns)),
        }
    }

    /// Keep only `columns`, in the given order.
    pub fn project(&self, columns: &[String]) -> Result<Table> {
        for column in columns {
            self.require_column(column)?;
        }

        let mut table = Table::new(columns.to_vec());
        for row in &self.rows {
            table.push_record(
                columns
                    .iter()
                    .map(|c| row.get(c).unwrap_or_default().to_string())
                    .collect(),
            );
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_records(
            ["Topic", "Book", "Page"],
            [vec!["Loops", "1", "12"], vec!["Arrays", "2"]],
        )
    }

    #[test]
    fn test_rows_follow_column_order() {
        let table = sample();
        let row = &table.rows()[0];
        let columns: Vec<&str> = row.iter().map(|(c, _)| c).collect();
        assert_eq!(columns, vec!["Topic", "Book", "Page"]);
        assert_eq!(row.values().collect::<Vec<_>>(), vec!["Loops", "1", "12"]);
    }

    #[test]
    fn test_short_records_are_padded() {
        let table = sample();
        assert_eq!(table.rows()[1].get("Page"), Some(""));
        assert_eq!(table.rows()[1].len(), 3);
    }

    #[test]
    fn test_key_column_defaults_to_first() {
        let table = sample();
        assert_eq!(table.key_column(None).unwrap(), "Topic");
        assert_eq!(table.key_column(Some("")).unwrap(), "Topic");
        assert_eq!(table.key_column(Some("Book")).unwrap(), "Book");
    }

    #[test]
    fn test_key_column_missing() {
        let table = sample();
        let err = table.key_column(Some("Notes")).unwrap_err();
        assert!(matches!(err, IndexError::MissingColumn { ref column, .. } if column == "Notes"));
    }

    #[test]
    fn test_key_column_without_columns() {
        let table = Table::new(vec![]);
        assert!(matches!(
            table.key_column(None),
            Err(IndexError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_project_reorders_columns() {
        let table = sample();
        let projected = table
            .project(&["Page".to_string(), "Topic".to_string()])
            .unwrap();
        assert_eq!(projected.columns(), &["Page", "Topic"]);
        assert_eq!(
            projected.rows()[0].values().collect::<Vec<_>>(),
            vec!["12", "Loops"]
        );
    }

    #[test]
    fn test_project_missing_column() {
        let table = sample();
        assert!(table.project(&["Notes".to_string()]).is_err());
    }
}
