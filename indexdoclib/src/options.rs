//! Input options for building an index document.
//!
//! This module contains the configuration types that control how a table is
//! grouped, sorted and titled, plus the presets the CLI exposes.

use serde::{Deserialize, Serialize};

use crate::data::{NormalizeOptions, DEFAULT_NOTES_COLUMN};
use crate::query::SortOptions;

/// Sort key used by the recommended presets.
pub const RECOMMENDED_SORT_COLUMN: &str = "Topic";

/// Columns of the fixed four-column index layout, in output order.
pub const FIXED_SCHEMA_COLUMNS: [&str; 4] = ["Topic", "Book", "Page", "Notes"];

/// Options for building an index document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexOptions {
    /// Document title; empty titles are not rendered
    pub title: Option<String>,
    /// Worksheet to read (first sheet when `None`)
    pub sheet: Option<String>,
    /// Grouping key column (first column when `None`)
    pub group_key: Option<String>,
    /// Sort key column (first column when `None`)
    pub sort_key: Option<String>,
    /// Columns whose grouped values are joined with a space
    pub notes_columns: Vec<String>,
    /// Project the table onto exactly these columns after grouping
    pub schema: Option<Vec<String>>,
    /// Sort-key comparison flags
    pub sort: SortOptions,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            title: None,
            sheet: None,
            group_key: None,
            sort_key: None,
            notes_columns: vec![DEFAULT_NOTES_COLUMN.to_string()],
            schema: None,
            sort: SortOptions::default(),
        }
    }
}

impl IndexOptions {
    /// First column as both keys, raw text sorting.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort by `Topic`, ignoring case and symbols, numbers under `#`.
    pub fn recommended() -> Self {
        Self {
            sort_key: Some(RECOMMENDED_SORT_COLUMN.to_string()),
            sort: SortOptions::recommended(),
            ..Self::default()
        }
    }

    /// The fixed `Topic / Book / Page / Notes` layout with recommended sorting.
    pub fn fixed_schema() -> Self {
        Self {
            group_key: Some(FIXED_SCHEMA_COLUMNS[0].to_string()),
            schema: Some(FIXED_SCHEMA_COLUMNS.iter().map(|c| c.to_string()).collect()),
            ..Self::recommended()
        }
    }

    /// Builder: set the title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder: set the worksheet name
    pub fn sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    /// Builder: set the grouping key column
    pub fn group_key(mut self, column: impl Into<String>) -> Self {
        self.group_key = Some(column.into());
        self
    }

    /// Builder: set the sort key column
    pub fn sort_key(mut self, column: impl Into<String>) -> Self {
        self.sort_key = Some(column.into());
        self
    }

    /// Builder: replace the notes columns
    pub fn notes_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.notes_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: project onto a fixed set of columns
    pub fn schema<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schema = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Builder: set the sort flags
    pub fn sort(mut self, sort: SortOptions) -> Self {
        self.sort = sort;
        self
    }

    /// Title to render, if any.
    pub fn rendered_title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Grouping options derived from these options.
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            group_key: self.group_key.clone(),
            notes_columns: self.notes_columns.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_first_column() {
        let opts = IndexOptions::new();
        assert_eq!(opts.group_key, None);
        assert_eq!(opts.sort_key, None);
        assert_eq!(opts.notes_columns, vec!["Notes"]);
        assert_eq!(opts.sort, SortOptions::default());
    }

    #[test]
    fn test_recommended_sorts_by_topic() {
        let opts = IndexOptions::recommended();
        assert_eq!(opts.sort_key.as_deref(), Some("Topic"));
        assert_eq!(opts.group_key, None);
        assert_eq!(opts.sort, SortOptions::recommended());
    }

    #[test]
    fn test_recommended_sort_key_override() {
        let opts = IndexOptions::recommended().sort_key("Book");
        assert_eq!(opts.sort_key.as_deref(), Some("Book"));
        assert!(opts.sort.ignore_case);
    }

    #[test]
    fn test_fixed_schema_preset() {
        let opts = IndexOptions::fixed_schema();
        assert_eq!(opts.group_key.as_deref(), Some("Topic"));
        assert_eq!(opts.sort_key.as_deref(), Some("Topic"));
        assert_eq!(
            opts.schema,
            Some(vec![
                "Topic".to_string(),
                "Book".to_string(),
                "Page".to_string(),
                "Notes".to_string()
            ])
        );
    }

    #[test]
    fn test_rendered_title_skips_blank() {
        assert_eq!(IndexOptions::new().rendered_title(), None);
        assert_eq!(IndexOptions::new().title("  ").rendered_title(), None);
        assert_eq!(
            IndexOptions::new().title("Study Index").rendered_title(),
            Some("Study Index")
        );
    }

    #[test]
    fn test_normalize_options_carry_keys() {
        let opts = IndexOptions::new().group_key("Book").notes_columns(["Remarks"]);
        let normalize = opts.normalize_options();
        assert_eq!(normalize.group_key.as_deref(), Some("Book"));
        assert_eq!(normalize.notes_columns, vec!["Remarks"]);
    }
}
