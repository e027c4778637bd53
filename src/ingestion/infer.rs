//! Column type inference shared by every ingestion source.
//!
//! Readers push one [`Cell`] per value into a [`TableBuilder`]; when the table is finished,
//! each column is typed from its non-missing cells:
//!
//! 1. all integer-like → [`DataType::Int64`] (or [`DataType::Float64`] when the column has
//!    missing values)
//! 2. all numeric → [`DataType::Float64`]
//! 3. all boolean → [`DataType::Bool`] (or [`DataType::Object`] when the column has missing
//!    values)
//! 4. anything else → [`DataType::Object`]
//!
//! A column whose cells are all missing is `Float64`; a column with no rows at all is
//! `Object`.

use std::collections::HashMap;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Raw text tokens treated as missing values.
pub const NA_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Returns `true` if `raw` is one of [`NA_MARKERS`] (exact match).
pub fn is_na_marker(raw: &str) -> bool {
    NA_MARKERS.contains(&raw)
}

/// A value as produced by a reader, before the column it belongs to is typed.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Missing value.
    Null,
    /// Integer from a typed source.
    Int(i64),
    /// Float from a typed source. Never NaN.
    Float(f64),
    /// Boolean from a typed source.
    Bool(bool),
    /// Untyped token (CSV field, spreadsheet string) that may still parse as a number or bool.
    Raw(String),
    /// Text from a typed source; never re-parsed.
    Text(String),
}

impl Cell {
    /// Untyped token; NA markers become [`Cell::Null`].
    pub fn from_raw(raw: &str) -> Self {
        if is_na_marker(raw) {
            Self::Null
        } else {
            Self::Raw(raw.to_owned())
        }
    }

    /// Float cell; NaN becomes [`Cell::Null`].
    pub fn from_f64(v: f64) -> Self {
        if v.is_nan() { Self::Null } else { Self::Float(v) }
    }
}

fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "True" | "TRUE" | "true" => Some(true),
        "False" | "FALSE" | "false" => Some(false),
        _ => None,
    }
}

fn float_value(v: f64) -> Value {
    if v.is_nan() { Value::Null } else { Value::Float64(v) }
}

/// What every non-missing cell of a column has in common.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Empty,
    AllNull,
    Int,
    Float,
    Bool,
    Mixed,
}

/// Accumulates the cells of one column.
#[derive(Debug, Clone, Default)]
pub struct ColumnBuilder {
    name: String,
    cells: Vec<Cell>,
}

impl ColumnBuilder {
    /// Create an empty column.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: Vec::new(),
        }
    }

    /// Append a cell.
    pub fn push(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// Number of cells pushed so far.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cells were pushed.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn kind(&self) -> (Kind, bool) {
        if self.cells.is_empty() {
            return (Kind::Empty, false);
        }

        let mut has_null = false;
        let mut non_null = 0usize;
        let (mut all_int, mut all_num, mut all_bool) = (true, true, true);
        for cell in &self.cells {
            match cell {
                Cell::Null => {
                    has_null = true;
                    continue;
                }
                Cell::Int(_) => all_bool = false,
                Cell::Float(_) => {
                    all_int = false;
                    all_bool = false;
                }
                Cell::Bool(_) => {
                    all_int = false;
                    all_num = false;
                }
                Cell::Raw(s) => {
                    all_int = all_int && parse_int(s).is_some();
                    all_num = all_num && parse_float(s).is_some();
                    all_bool = all_bool && parse_bool(s).is_some();
                }
                Cell::Text(_) => {
                    all_int = false;
                    all_num = false;
                    all_bool = false;
                }
            }
            non_null += 1;
        }

        let kind = if non_null == 0 {
            Kind::AllNull
        } else if all_int {
            Kind::Int
        } else if all_num {
            Kind::Float
        } else if all_bool {
            Kind::Bool
        } else {
            Kind::Mixed
        };
        (kind, has_null)
    }

    /// Type the column and convert its cells into values.
    pub fn finish(self) -> (Field, Vec<Value>) {
        let (kind, has_null) = self.kind();
        let data_type = match kind {
            Kind::Empty | Kind::Mixed => DataType::Object,
            Kind::AllNull | Kind::Float => DataType::Float64,
            Kind::Int if has_null => DataType::Float64,
            Kind::Int => DataType::Int64,
            Kind::Bool if has_null => DataType::Object,
            Kind::Bool => DataType::Bool,
        };

        let values = self
            .cells
            .into_iter()
            .map(|cell| convert_cell(cell, kind, data_type))
            .collect();
        (Field::new(self.name, data_type), values)
    }
}

fn convert_cell(cell: Cell, kind: Kind, data_type: DataType) -> Value {
    match (kind, cell) {
        (_, Cell::Null) | (Kind::AllNull | Kind::Empty, _) => Value::Null,
        (Kind::Int, Cell::Int(v)) if data_type == DataType::Int64 => Value::Int64(v),
        (Kind::Int, Cell::Raw(s)) if data_type == DataType::Int64 => {
            parse_int(&s).map(Value::Int64).unwrap_or(Value::Null)
        }
        (Kind::Int | Kind::Float, Cell::Int(v)) => Value::Float64(v as f64),
        (Kind::Int | Kind::Float, Cell::Float(v)) => float_value(v),
        (Kind::Int | Kind::Float, Cell::Raw(s)) => {
            parse_float(&s).map(float_value).unwrap_or(Value::Null)
        }
        (Kind::Bool, Cell::Raw(s)) => parse_bool(&s).map(Value::Bool).unwrap_or(Value::Null),
        (_, Cell::Bool(b)) => Value::Bool(b),
        (_, Cell::Int(v)) => Value::Int64(v),
        (_, Cell::Float(v)) => float_value(v),
        (_, Cell::Raw(s)) | (_, Cell::Text(s)) => Value::Utf8(s),
    }
}

/// Make header names unique and non-empty.
///
/// Empty names at position `i` become `Unnamed: i`; repeated names get `.1`, `.2`, ...
/// suffixes (skipping suffixes that are already taken).
pub fn normalize_headers(raw: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(raw.len());

    for (idx, name) in raw.into_iter().enumerate() {
        let mut name = if name.trim().is_empty() {
            format!("Unnamed: {idx}")
        } else {
            name
        };

        let mut cur = counts.get(&name).copied().unwrap_or(0);
        while cur > 0 {
            counts.insert(name.clone(), cur + 1);
            name = format!("{name}.{cur}");
            cur = counts.get(&name).copied().unwrap_or(0);
        }
        counts.insert(name.clone(), cur + 1);
        out.push(name);
    }
    out
}

/// Builds a [`DataSet`] row by row, inferring column types on [`TableBuilder::finish`].
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    columns: Vec<ColumnBuilder>,
    rows: usize,
}

impl TableBuilder {
    /// Create a builder for the given header row (normalized with [`normalize_headers`]).
    pub fn new(headers: Vec<String>) -> Self {
        let columns = normalize_headers(headers)
            .into_iter()
            .map(ColumnBuilder::new)
            .collect();
        Self { columns, rows: 0 }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Append one row. Short rows are padded with missing values.
    ///
    /// `user_row` is the 1-based row number reported in errors.
    pub fn push_row<I>(&mut self, user_row: usize, cells: I) -> IngestionResult<()>
    where
        I: IntoIterator<Item = Cell>,
    {
        let width = self.columns.len();
        let mut seen = 0usize;
        for cell in cells {
            if seen >= width {
                if matches!(cell, Cell::Null) {
                    continue;
                }
                return Err(IngestionError::Malformed {
                    message: format!(
                        "row {user_row}: expected {width} fields, found more"
                    ),
                });
            }
            self.columns[seen].push(cell);
            seen += 1;
        }
        for column in &mut self.columns[seen..] {
            column.push(Cell::Null);
        }
        self.rows += 1;
        Ok(())
    }

    /// Type every column and assemble the dataset.
    pub fn finish(self) -> DataSet {
        let mut fields = Vec::with_capacity(self.columns.len());
        let mut columns = Vec::with_capacity(self.columns.len());
        for builder in self.columns {
            let (field, values) = builder.finish();
            fields.push(field);
            columns.push(values.into_iter());
        }

        let mut rows = Vec::with_capacity(self.rows);
        for _ in 0..self.rows {
            rows.push(
                columns
                    .iter_mut()
                    .map(|col| col.next().unwrap_or(Value::Null))
                    .collect(),
            );
        }
        DataSet::new(Schema::new(fields), rows)
    }
}
