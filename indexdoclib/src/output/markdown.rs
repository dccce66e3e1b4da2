//! Markdown rendering for quick previews and plain-text publishing.
//!
//! Markdown tables have no row backgrounds, so shading is dropped.

use std::path::Path;

use super::document::IndexRenderer;
use super::write_output;
use crate::Result;

/// Renders an index document as Markdown with pipe tables.
#[derive(Debug, Default)]
pub struct MarkdownRenderer {
    out: String,
    in_table: bool,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The rendered Markdown.
    pub fn finish(self) -> String {
        self.out
    }

    /// Write the rendered Markdown to `path`, creating parent directories.
    pub fn write_to(self, path: impl AsRef<Path>) -> Result<()> {
        write_output(path.as_ref(), self.out.as_bytes())
    }

    /// Blank line between blocks.
    fn begin_block(&mut self) {
        self.in_table = false;
        if !self.out.is_empty() && !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    fn push_row<'a>(&mut self, cells: impl IntoIterator<Item = &'a str>) {
        self.out.push('|');
        for cell in cells {
            self.out.push(' ');
            self.out.push_str(&escape_cell(cell));
            self.out.push_str(" |");
        }
        self.out.push('\n');
    }
}

impl IndexRenderer for MarkdownRenderer {
    fn add_title(&mut self, text: &str) -> Result<()> {
        self.begin_block();
        self.out.push_str(&format!("# {}\n", text.trim()));
        Ok(())
    }

    fn add_section_heading(&mut self, label: &str) -> Result<()> {
        self.begin_block();
        self.out.push_str(&format!("## {label}\n"));
        Ok(())
    }

    fn start_table(&mut self, columns: &[String]) -> Result<()> {
        self.begin_block();
        self.push_row(columns.iter().map(String::as_str));
        self.push_row(columns.iter().map(|_| "---"));
        self.in_table = true;
        Ok(())
    }

    fn add_row(&mut self, values: &[String], _shaded: bool) -> Result<()> {
        if !self.in_table {
            self.begin_block();
            self.in_table = true;
        }
        self.push_row(values.iter().map(String::as_str));
        Ok(())
    }
}

fn escape_cell(value: &str) -> String {
    value
        .trim_end_matches('\n')
        .replace('|', "\\|")
        .replace('\n', "<br>")
}
