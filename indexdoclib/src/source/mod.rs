//! Source loading: read spreadsheet rows.
//!
//! This module handles the first stage of the pipeline - reading the input
//! worksheet into a `RawTable`. It provides:
//!
//! - **Format detection**: Which file extensions can be read
//! - **Sheet loading**: Header cleanup and typed cells via calamine
//!
//! ## Example
//!
//! ```rust,ignore
//! use indexdoclib::source::load_sheet;
//!
//! let raw = load_sheet("index.xlsx", None)?;
//! println!("{} columns, {} records", raw.columns.len(), raw.records.len());
//! ```

pub mod sheet;

pub use sheet::{cell_value, header_names, is_supported, load_sheet, SUPPORTED_EXTENSIONS};
