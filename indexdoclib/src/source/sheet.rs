//! Spreadsheet loading with calamine.
//!
//! The first row of the selected worksheet is the header row. Blank headers
//! become `Unnamed: <index>` and repeated headers get a numeric suffix, so
//! every column can be addressed by a unique name.

use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use tracing::{debug, warn};

use crate::data::{CellValue, RawTable};
use crate::error::IndexError;
use crate::Result;

/// File extensions calamine can open.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Check whether `path` has a spreadsheet extension we can read.
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
}

/// Load one worksheet (the first when `sheet` is `None`) into a raw table.
pub fn load_sheet(path: impl AsRef<Path>, sheet: Option<&str>) -> Result<RawTable> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(IndexError::InputNotFound {
            path: path.to_path_buf(),
            reason: "no such file".to_string(),
        });
    }
    if !is_supported(path) {
        return Err(IndexError::UnsupportedFormat(path.to_path_buf()));
    }

    let unreadable = |e: calamine::Error| IndexError::InputNotFound {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let mut workbook = open_workbook_auto(path).map_err(unreadable)?;
    let range = match sheet {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|n| n == name) {
                return Err(IndexError::SheetNotFound(name.to_string()));
            }
            workbook.worksheet_range(name).map_err(unreadable)?
        }
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| IndexError::EmptyInput("workbook has no worksheets".to_string()))?
            .map_err(unreadable)?,
    };

    let table = range_to_table(&range);
    debug!(
        path = %path.display(),
        columns = table.columns.len(),
        records = table.records.len(),
        "loaded worksheet"
    );
    Ok(table)
}

/// Convert a worksheet range into a raw table, skipping fully blank records.
pub fn range_to_table(range: &Range<Data>) -> RawTable {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return RawTable::default();
    };

    let mut table = RawTable::new(header_names(header.iter().map(cell_value)));
    let mut skipped = 0usize;
    for row in rows {
        let record: Vec<CellValue> = row.iter().map(cell_value).collect();
        if record.iter().all(CellValue::is_blank) {
            skipped += 1;
            continue;
        }
        table.push_record(record);
    }

    if skipped > 0 {
        debug!(skipped, "skipped blank records");
    }
    table
}

/// Map a calamine cell onto our raw cell type.
pub fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| CellValue::DateTime(d.to_string()))
            .unwrap_or_else(|| CellValue::Float(dt.as_f64())),
        Data::Error(e) => CellValue::Error(e.to_string()),
        other => CellValue::Text(other.to_string()),
    }
}

/// Unique, non-empty column names for a header row.
pub fn header_names(cells: impl IntoIterator<Item = CellValue>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut suffixes: HashMap<String, usize> = HashMap::new();

    for (index, cell) in cells.into_iter().enumerate() {
        let base = if cell.is_blank() {
            let placeholder = format!("Unnamed: {index}");
            warn!(column = %placeholder, "blank header");
            placeholder
        } else {
            cell.to_text()
        };

        let mut name = base.clone();
        while names.contains(&name) {
            let n = suffixes.entry(base.clone()).or_insert(0);
            *n += 1;
            name = format!("{base}.{n}");
        }
        if name != base {
            warn!(column = %base, renamed = %name, "duplicate header renamed");
        }
        names.push(name);
    }

    names
}
