//! Output: lay out index documents.
//!
//! This module handles the fourth and final stage of the pipeline -
//! presenting the sectioned index. It provides:
//!
//! - **IndexDocument**: Title, column headers and sections with shaded entries
//! - **IndexRenderer**: The calls a renderer receives, in document order
//! - **DocxRenderer**: Landscape Word document with banded tables
//! - **MarkdownRenderer**: Headings plus pipe tables
//!
//! IndexDocument is a pure data structure; renderers only lay it out.
//!
//! ## Example
//!
//! ```rust
//! use indexdoclib::data::Table;
//! use indexdoclib::output::{IndexDocument, MarkdownRenderer};
//! use indexdoclib::query::SortOptions;
//!
//! let table = Table::from_records(["Topic", "Page"], [vec!["Loops", "12"]]);
//! let doc = IndexDocument::from_table(&table, Some("Index"), None, &SortOptions::new()).unwrap();
//!
//! let mut renderer = MarkdownRenderer::new();
//! doc.render(&mut renderer).unwrap();
//! assert!(renderer.finish().contains("## L"));
//! ```

pub mod document;
pub mod docx;
pub mod markdown;

use std::fs;
use std::path::Path;

use tracing::info;

pub use document::{IndexDocument, IndexRenderer};
pub use docx::DocxRenderer;
pub use markdown::MarkdownRenderer;

use crate::Result;

/// Write a finished document, creating missing parent directories.
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "wrote index document");
    Ok(())
}
