//! The index document model and the renderer contract that lays it out.
//!
//! The data flow is:
//! 1. Raw sheet (cells + header)
//! 2. Grouped table (one row per key)
//! 3. IndexDocument (title, headers, sections with shaded entries)
//!
//! Renderers receive the document as a flat sequence of calls and never see
//! the table or sort options.

use serde::{Deserialize, Serialize};

use crate::data::Table;
use crate::query::{build_sections, Section, SortOptions};
use crate::Result;

/// Sink for a rendered index document.
///
/// [`IndexDocument::render`] calls `add_title` at most once, then for every
/// section `add_section_heading` (labeled sections only), `start_table` and
/// one `add_row` per entry.
pub trait IndexRenderer {
    fn add_title(&mut self, text: &str) -> Result<()>;

    fn add_section_heading(&mut self, label: &str) -> Result<()>;

    /// Begin a new table whose header row lists `columns`.
    fn start_table(&mut self, columns: &[String]) -> Result<()>;

    /// Append a row to the table most recently started.
    fn add_row(&mut self, values: &[String], shaded: bool) -> Result<()>;
}

/// A complete, render-ready index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Column names in table order
    pub headers: Vec<String>,
    pub sections: Vec<Section>,
}

impl IndexDocument {
    /// Sort and section a grouped table.
    pub fn from_table(
        table: &Table,
        title: Option<&str>,
        sort_key: Option<&str>,
        sort: &SortOptions,
    ) -> Result<Self> {
        let sections = build_sections(table, sort_key, sort)?;

        Ok(IndexDocument {
            title: title.map(str::to_string),
            headers: table.columns().to_vec(),
            sections,
        })
    }

    /// Number of entries across all sections.
    pub fn row_count(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }

    /// Labels of the labeled sections, in document order.
    pub fn labels(&self) -> Vec<&str> {
        self.sections
            .iter()
            .filter_map(|s| s.label.as_deref())
            .collect()
    }

    /// Drive `renderer` through the document.
    pub fn render<R: IndexRenderer + ?Sized>(&self, renderer: &mut R) -> Result<()> {
        if let Some(title) = self.title.as_deref().filter(|t| !t.trim().is_empty()) {
            renderer.add_title(title)?;
        }

        for section in &self.sections {
            if let Some(label) = &section.label {
                renderer.add_section_heading(label)?;
            }
            renderer.start_table(&self.headers)?;
            for entry in &section.entries {
                renderer.add_row(&entry.values, entry.shaded)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl IndexRenderer for Recorder {
        fn add_title(&mut self, text: &str) -> Result<()> {
            self.calls.push(format!("title:{text}"));
            Ok(())
        }

        fn add_section_heading(&mut self, label: &str) -> Result<()> {
            self.calls.push(format!("heading:{label}"));
            Ok(())
        }

        fn start_table(&mut self, columns: &[String]) -> Result<()> {
            self.calls.push(format!("table:{}", columns.join(",")));
            Ok(())
        }

        fn add_row(&mut self, values: &[String], shaded: bool) -> Result<()> {
            self.calls.push(format!("row:{}:{shaded}", values.join(",")));
            Ok(())
        }
    }

    fn sample_table() -> Table {
        Table::from_records(
            ["Topic", "Page"],
            [
                vec!["banana", "3"],
                vec!["Apple", "1"],
                vec!["apple pie", "2"],
                vec!["Cherry", "4"],
            ],
        )
    }

    #[test]
    fn test_render_call_sequence() {
        let doc = IndexDocument::from_table(
            &sample_table(),
            Some("Fruit"),
            None,
            &SortOptions::recommended(),
        )
        .unwrap();

        let mut recorder = Recorder::default();
        doc.render(&mut recorder).unwrap();

        assert_eq!(
            recorder.calls,
            vec![
                "title:Fruit",
                "heading:A",
                "table:Topic,Page",
                "row:Apple,1:false",
                "row:apple pie,2:true",
                "heading:B",
                "table:Topic,Page",
                "row:banana,3:false",
                "heading:C",
                "table:Topic,Page",
                "row:Cherry,4:false",
            ]
        );
    }

    #[test]
    fn test_blank_title_is_not_rendered() {
        let doc =
            IndexDocument::from_table(&sample_table(), Some(""), None, &SortOptions::new())
                .unwrap();
        let mut recorder = Recorder::default();
        doc.render(&mut recorder).unwrap();
        assert!(!recorder.calls.iter().any(|c| c.starts_with("title:")));
    }

    #[test]
    fn test_unlabeled_section_has_table_without_heading() {
        let table = Table::from_records(["Topic"], [vec!["--"], vec!["apple"]]);
        let doc =
            IndexDocument::from_table(&table, None, None, &SortOptions::recommended()).unwrap();

        let mut recorder = Recorder::default();
        doc.render(&mut recorder).unwrap();

        assert_eq!(
            recorder.calls,
            vec![
                "table:Topic",
                "row:--:false",
                "heading:A",
                "table:Topic",
                "row:apple:false",
            ]
        );
    }

    #[test]
    fn test_row_count_and_labels() {
        let doc = IndexDocument::from_table(
            &sample_table(),
            None,
            Some("Topic"),
            &SortOptions::recommended(),
        )
        .unwrap();
        assert_eq!(doc.row_count(), 4);
        assert_eq!(doc.labels(), vec!["A", "B", "C"]);
        assert_eq!(doc.headers, vec!["Topic", "Page"]);
    }
}
