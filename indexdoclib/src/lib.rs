//! # indexdoclib
//!
//! Build browsable index documents from spreadsheet resource indexes.
//!
//! ## Overview
//!
//! A resource index is a spreadsheet of rows like topic / book / page / notes.
//! This library turns it into a document grouped by the first letter (or
//! number) of a chosen sort key, with one heading and one banded table per
//! section.
//!
//! The pipeline has four stages:
//!
//! - **source**: Read the worksheet into raw cells (`load_sheet`)
//! - **data**: Fill, coerce to text and group rows sharing a key (`normalize`)
//! - **query**: Stable sort and split into labeled sections (`build_sections`)
//! - **output**: Drive a renderer through the `IndexDocument` (`DocxRenderer`)
//!
//! ## Features
//!
//! - **Configurable keys**: Any column can be the grouping or sort key
//! - **Forgiving sort**: Optionally ignore case and symbols when sorting
//! - **Number grouping**: Collapse digit-led entries into one `#` section
//! - **Pure data types**: Every stage returns plain data, no I/O side effects
//!
//! ## Example
//!
//! ```rust
//! use indexdoclib::{build_index_from_raw, IndexOptions, MarkdownRenderer, RawTable};
//!
//! let raw = RawTable::new(vec!["Topic".into(), "Page".into(), "Notes".into()])
//!     .with_record(["banana", "3", ""])
//!     .with_record(["Apple", "1", "see ch.2"])
//!     .with_record(["Apple", "4", "see ch.5"]);
//!
//! let doc = build_index_from_raw(&raw, &IndexOptions::recommended().title("Fruit")).unwrap();
//! assert_eq!(doc.labels(), vec!["A", "B"]);
//! assert_eq!(doc.sections[0].entries[0].values[2], "see ch.2 see ch.5");
//!
//! let mut renderer = MarkdownRenderer::new();
//! doc.render(&mut renderer).unwrap();
//! assert!(renderer.finish().starts_with("# Fruit"));
//! ```

pub mod data;
pub mod error;
pub mod options;
pub mod output;
pub mod pipeline;
pub mod query;
pub mod source;

pub use data::{group_rows, normalize, CellValue, NormalizeOptions, RawTable, Row, Table};
pub use error::IndexError;
pub use options::{IndexOptions, FIXED_SCHEMA_COLUMNS, RECOMMENDED_SORT_COLUMN};
pub use output::{DocxRenderer, IndexDocument, IndexRenderer, MarkdownRenderer};
pub use pipeline::{build_index, build_index_from_raw};
pub use query::{build_sections, sort_rows, IndexEntry, Section, SortOptions};
pub use source::load_sheet;

/// Result type for indexdoclib operations
pub type Result<T> = std::result::Result<T, IndexError>;
