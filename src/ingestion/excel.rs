#![cfg(feature = "excel")]

use std::path::Path;

use calamine::{open_workbook_auto, CellErrorType, Data, DataType as _, Reader};

use crate::error::{IngestionError, IngestionResult};
use crate::types::DataSet;

use super::infer::{Cell, TableBuilder};

/// Ingest the first worksheet of an Excel workbook into an in-memory `DataSet`.
///
/// Behavior:
/// - Uses the first sheet in workbook order
/// - Detects the first non-empty row as the header row
/// - Reads remaining rows and infers column types the same way CSV ingestion does
pub fn ingest_excel_from_path(path: impl AsRef<Path>) -> IngestionResult<DataSet> {
    let mut workbook = open_workbook_auto(path)?;

    let first = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| IngestionError::Malformed {
            message: "workbook has no sheets".to_string(),
        })?;

    let range = workbook.worksheet_range(&first)?;
    ingest_sheet_range(&first, &range)
}

fn ingest_sheet_range(sheet: &str, range: &calamine::Range<Data>) -> IngestionResult<DataSet> {
    let Some((header_row_idx, header)) = range
        .rows()
        .enumerate()
        .find(|(_, row)| row.iter().any(|c| !matches!(c, Data::Empty)))
    else {
        // An empty sheet is an empty table, not an error.
        return Ok(DataSet::default());
    };

    let mut table = TableBuilder::new(header.iter().map(cell_to_header_string).collect());
    for (idx0, row) in range.rows().enumerate().skip(header_row_idx + 1) {
        // Report 1-based row number (Excel-like).
        let user_row = idx0 + 1;
        table
            .push_row(user_row, row.iter().map(convert_cell))
            .map_err(|e| wrap_err_with_sheet(sheet, e))?;
    }

    Ok(table.finish())
}

fn wrap_err_with_sheet(sheet: &str, err: IngestionError) -> IngestionError {
    match err {
        IngestionError::Malformed { message } => IngestionError::Malformed {
            message: format!("sheet '{sheet}': {message}"),
        },
        other => other,
    }
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn convert_cell(c: &Data) -> Cell {
    match c {
        Data::Empty => Cell::Null,
        Data::Int(i) => Cell::Int(*i),
        // Whole-number floats are how spreadsheets store integers.
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Cell::Int(*f as i64),
        Data::Float(f) => Cell::from_f64(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::String(s) => Cell::from_raw(s),
        Data::DateTime(_) | Data::DateTimeIso(_) => match c.as_datetime() {
            Some(dt) => Cell::Text(dt.to_string()),
            None => Cell::Text(c.to_string()),
        },
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(CellErrorType::NA) => Cell::Null,
        Data::Error(_) => Cell::Text(c.to_string()),
    }
}
