//! Data normalization: turn raw cells into grouped text tables.
//!
//! This module handles the second stage of the pipeline - taking the raw
//! spreadsheet cells and producing a text-only table with one row per
//! grouping key. It provides:
//!
//! - **Cells**: Raw cell values and the untyped `RawTable`
//! - **Tables**: Typed `Row` / `Table` structures with ordered columns
//! - **Normalizing**: Fill, coerce and group (`normalize`, `group_rows`)
//!
//! ## Example
//!
//! ```rust
//! use indexdoclib::data::{group_rows, NormalizeOptions, Table};
//!
//! let table = Table::from_records(
//!     ["Topic", "Page", "Notes"],
//!     [vec!["Loops", "12", "see ch.2"], vec!["Loops", "40", "see ch.5"]],
//! );
//! let grouped = group_rows(&table, &NormalizeOptions::new()).unwrap();
//! assert_eq!(grouped.rows()[0].get("Page"), Some("12\n40"));
//! assert_eq!(grouped.rows()[0].get("Notes"), Some("see ch.2 see ch.5"));
//! ```

pub mod cell;
pub mod normalize;
pub mod table;

pub use cell::{CellValue, RawTable};
pub use normalize::{
    group_rows, normalize, NormalizeOptions, DEFAULT_NOTES_COLUMN, LINE_SEPARATOR,
    NOTES_SEPARATOR,
};
pub use table::{Row, Table};
