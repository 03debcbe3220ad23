//! Excel/ODS file reader using calamine

use calamine::{Data, Range, Reader, open_workbook_auto};
use log::{debug, info, warn};
use serde::Serialize;
use std::path::Path;

use crate::config::SheetSpec;
use crate::error::IngestError;

pub mod workbook;

pub use workbook::{CellValue, RowRecord, SheetData, WorkbookData};

/// Result of a successful load
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestOutcome {
    /// File name without its directory
    pub file_name: String,
    pub data: WorkbookData,
    /// Sheets stored in `data`, in configured order
    pub processed: Vec<String>,
    /// Expected sheets absent from the file, in configured order
    pub missing: Vec<String>,
    /// Expected sheets present in the file but dropped (no rows or no header),
    /// in configured order
    pub skipped: Vec<String>,
}

/// Read the expected sheets of a workbook into row records
pub fn load_workbook<P: AsRef<Path>>(
    path: P,
    sheet_specs: &[SheetSpec],
) -> Result<IngestOutcome, IngestError> {
    let path = path.as_ref();
    let file_name = display_name(path);

    let mut excel = open_workbook_auto(path)
        .map_err(|e| IngestError::Unreadable(format!("{}: {}", path.display(), e)))?;

    let available = excel.sheet_names();

    let (found, missing): (Vec<&SheetSpec>, Vec<&SheetSpec>) = sheet_specs
        .iter()
        .partition(|spec| available.iter().any(|name| *name == spec.name));
    let missing: Vec<String> = missing.iter().map(|s| s.name.clone()).collect();

    if found.is_empty() {
        warn!("No expected sheet found in '{}'", file_name);
        return Err(IngestError::NoExpectedSheets { file_name, missing });
    }
    if !missing.is_empty() {
        info!("Missing sheets in '{}': {}", file_name, missing.join(", "));
    }

    let mut data = WorkbookData::new();
    let mut processed = Vec::new();
    let mut skipped = Vec::new();

    // Walk the file's own sheet order
    for sheet_name in &available {
        let Some(spec) = found.iter().find(|s| s.name == *sheet_name) else {
            continue;
        };

        let range = excel.worksheet_range(sheet_name).map_err(|e| {
            IngestError::Unreadable(format!("sheet '{}': {}", sheet_name, e))
        })?;

        match parse_sheet(&range, spec.expected_columns) {
            SheetParse::Rows(rows) => {
                info!("Sheet '{}' processed: {} data rows", sheet_name, rows.len());
                data.insert(sheet_name.clone(), rows);
                processed.push(sheet_name.clone());
            }
            SheetParse::Empty => {
                info!("Sheet '{}' is empty, skipped", sheet_name);
                skipped.push(sheet_name.clone());
            }
            SheetParse::NoHeaders => {
                info!("Sheet '{}' has no valid headers, skipped", sheet_name);
                skipped.push(sheet_name.clone());
            }
        }
    }

    // Report in configured order; `data` keeps the file order
    let order = |name: &String| sheet_specs.iter().position(|s| s.name == *name);
    processed.sort_by_key(order);
    skipped.sort_by_key(order);

    Ok(IngestOutcome {
        file_name,
        data,
        processed,
        missing,
        skipped,
    })
}

#[derive(Debug, PartialEq)]
enum SheetParse {
    Rows(Vec<RowRecord>),
    Empty,
    NoHeaders,
}

fn parse_sheet(range: &Range<Data>, expected_columns: usize) -> SheetParse {
    let rows = grid_rows(range);
    let Some((header_row, data_rows)) = rows.split_first() else {
        return SheetParse::Empty;
    };

    let header_cells: Vec<&CellValue> = header_row.iter().take(expected_columns).collect();
    if header_cells.iter().all(|c| c.is_blank()) {
        return SheetParse::NoHeaders;
    }
    let headers: Vec<String> = header_cells.iter().map(|c| c.to_string()).collect();
    debug!("Headers: {:?}", headers);

    let records = data_rows
        .iter()
        .filter(|row| row.iter().any(|c| !c.is_blank()))
        .map(|row| RowRecord::from_pairs(&headers, row.iter().take(expected_columns)))
        .collect();

    SheetParse::Rows(records)
}

/// Rows of a range anchored at A1, so leading blank rows and columns stay in place
fn grid_rows(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    if range.is_empty() {
        return Vec::new();
    }
    let Some((max_row, max_col)) = range.end() else {
        return Vec::new();
    };

    (0..=max_row)
        .map(|row| {
            (0..=max_col)
                .map(|col| {
                    range
                        .get_value((row, col))
                        .map(parse_cell_value)
                        .unwrap_or(CellValue::Empty)
                })
                .collect()
        })
        .collect()
}

fn parse_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::Error(e) => CellValue::Text(e.to_string()),
        Data::Empty => CellValue::Empty,
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
