//! Query processing: sort rows and split them into sections.
//!
//! This module handles the third stage of the pipeline - ordering the
//! grouped table and partitioning it into labeled sections. It provides:
//!
//! - **Options**: How sort keys are compared (`SortOptions`)
//! - **Text**: Pure functions for sort tokens and section labels
//! - **Sections**: Stable sort and sectioning (`sort_rows`, `build_sections`)
//!
//! ## Example
//!
//! ```rust
//! use indexdoclib::data::Table;
//! use indexdoclib::query::{build_sections, SortOptions};
//!
//! let table = Table::from_records(
//!     ["Topic"],
//!     [vec!["banana"], vec!["Apple"], vec!["apple pie"], vec!["Cherry"]],
//! );
//! let sections = build_sections(&table, None, &SortOptions::recommended()).unwrap();
//! let labels: Vec<_> = sections.iter().filter_map(|s| s.label.as_deref()).collect();
//! assert_eq!(labels, vec!["A", "B", "C"]);
//! ```

pub mod options;
pub mod sections;
pub mod text;

pub use options::SortOptions;
pub use sections::{build_sections, sort_rows, IndexEntry, Section};
pub use text::{first_alphanumeric, section_label, sort_token, strip_symbols, NUMBER_SECTION_LABEL};
