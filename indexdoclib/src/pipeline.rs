//! End-to-end pipeline: spreadsheet in, index document out.
//!
//! Every check runs before anything is rendered, so a failing input never
//! produces a partial document.

use std::path::Path;

use tracing::{debug, info};

use crate::data::{normalize, RawTable};
use crate::error::IndexError;
use crate::options::IndexOptions;
use crate::output::IndexDocument;
use crate::source::load_sheet;
use crate::Result;

/// Load a spreadsheet and build its index document.
pub fn build_index(path: impl AsRef<Path>, options: &IndexOptions) -> Result<IndexDocument> {
    let path = path.as_ref();
    info!(path = %path.display(), "building index");

    let raw = load_sheet(path, options.sheet.as_deref())?;
    build_index_from_raw(&raw, options)
}

/// Build an index document from an already loaded table.
pub fn build_index_from_raw(raw: &RawTable, options: &IndexOptions) -> Result<IndexDocument> {
    if raw.columns.is_empty() {
        return Err(IndexError::EmptyInput("no columns".to_string()));
    }
    if raw.records.is_empty() {
        return Err(IndexError::EmptyInput("no rows".to_string()));
    }

    let mut table = normalize(raw, &options.normalize_options())?;
    if let Some(schema) = &options.schema {
        table = table.project(schema)?;
        debug!(columns = ?schema, "projected onto fixed schema");
    }

    let doc = IndexDocument::from_table(
        &table,
        options.rendered_title(),
        options.sort_key.as_deref(),
        &options.sort,
    )?;

    info!(
        rows = doc.row_count(),
        sections = doc.sections.len(),
        "index built"
    );
    Ok(doc)
}
