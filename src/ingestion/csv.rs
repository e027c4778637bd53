//! CSV ingestion implementation.

use std::path::Path;

use crate::error::{IngestionError, IngestionResult};
use crate::types::DataSet;

use super::infer::{Cell, TableBuilder};

/// Ingest a CSV file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - The first record is the header row.
/// - Column types are inferred from the data (see [`super::infer`]).
/// - Rows shorter than the header are padded with missing values; longer rows are an error.
pub fn ingest_csv_from_path(path: impl AsRef<Path>) -> IngestionResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr)
}

/// Ingest CSV data from an existing CSV reader.
///
/// Build the reader with `flexible(true)` to get padding of short rows instead of a
/// `csv` error.
pub fn ingest_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> IngestionResult<DataSet> {
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(IngestionError::Malformed {
            message: "no columns to parse from file".to_string(),
        });
    }

    let mut table = TableBuilder::new(headers.iter().map(str::to_owned).collect());
    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;
        table.push_row(user_row, record.iter().map(Cell::from_raw))?;
    }

    Ok(table.finish())
}
