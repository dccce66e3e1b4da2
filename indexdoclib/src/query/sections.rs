//! Sections: sorted rows partitioned by their leading character.
//!
//! Rows are stably sorted by their sort token, then walked in order. A section
//! is opened whenever a row's label differs from the label of the section
//! currently open. Rows without a label (no letter or digit in the key) join
//! whatever section is open; if none is open yet they form an unlabeled
//! leading section.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::options::SortOptions;
use super::text::{section_label, sort_token};
use crate::data::{Row, Table};
use crate::Result;

/// One row of a section table, with its band shading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Cell values in table column order
    pub values: Vec<String>,
    /// Whether the row gets the band background
    pub shaded: bool,
}

/// A run of consecutive sorted rows sharing a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading label; `None` only for an unlabeled leading section
    pub label: Option<String>,
    pub entries: Vec<IndexEntry>,
}

impl Section {
    fn open(label: Option<String>) -> Self {
        Self {
            label,
            entries: Vec::new(),
        }
    }

    /// Append a row; shading restarts at `false` for every section.
    fn push(&mut self, row: &Row) {
        let shaded = self.entries.len() % 2 == 1;
        self.entries.push(IndexEntry {
            values: row.values().map(str::to_string).collect(),
            shaded,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Rows of `table` stably sorted by the sort token of `sort_key`.
///
/// `sort_key` falls back to the first column when `None` or empty.
pub fn sort_rows<'a>(
    table: &'a Table,
    sort_key: Option<&str>,
    options: &SortOptions,
) -> Result<Vec<&'a Row>> {
    let key = table.key_column(sort_key)?;

    let mut rows: Vec<&Row> = table.rows().iter().collect();
    rows.sort_by_cached_key(|row| sort_token(row.get(key).unwrap_or_default(), options));
    Ok(rows)
}

/// Sort `table` and partition it into labeled sections.
pub fn build_sections(
    table: &Table,
    sort_key: Option<&str>,
    options: &SortOptions,
) -> Result<Vec<Section>> {
    let key = table.key_column(sort_key)?;
    let rows = sort_rows(table, Some(key), options)?;

    let mut sections = Vec::new();
    let mut current: Option<Section> = None;

    for row in rows {
        let label = section_label(row.get(key).unwrap_or_default(), options);

        let opens_new = match (&current, &label) {
            (_, None) => current.is_none(),
            (None, Some(_)) => true,
            (Some(open), Some(label)) => open.label.as_ref() != Some(label),
        };

        if opens_new {
            if let Some(done) = current.take() {
                sections.push(done);
            }
            current = Some(Section::open(label));
        }

        if let Some(section) = current.as_mut() {
            section.push(row);
        }
    }
    sections.extend(current);

    debug!(
        key,
        rows = table.len(),
        sections = sections.len(),
        "built sections"
    );
    Ok(sections)
}
