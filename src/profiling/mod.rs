//! Dataset profiling: shape, column types, missing values and numeric summaries.
//!
//! [`profile_dataset`] computes a [`Profile`] from an in-memory [`DataSet`];
//! [`profile_source`] resolves a [`TableSource`] (a file path or an already loaded table)
//! first and answers with a [`ProfileResponse`], the JSON body returned by the HTTP layer.
//!
//! ## Example
//!
//! ```rust
//! use data_profiler::profiling::profile_dataset;
//! use data_profiler::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("name", DataType::Object),
//!     Field::new("value", DataType::Float64),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Utf8("a".to_string()), Value::Float64(1.0)],
//!         vec![Value::Utf8("b".to_string()), Value::Null],
//!     ],
//! );
//!
//! let profile = profile_dataset(&ds);
//! assert_eq!(profile.row_count, 2);
//! assert_eq!(profile.missing_value_counts.get("value"), Some(&1));
//! assert_eq!(profile.basic_statistics.get("value").map(|s| s.count), Some(1));
//! assert!(profile.basic_statistics.get("name").is_none());
//! ```

pub mod describe;

use std::path::PathBuf;

use rayon::prelude::*;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::IngestionResult;
use crate::ingestion::{ingest_from_path, IngestionFormat, IngestionOptions};
use crate::types::DataSet;

pub use describe::{quantile, NumericSummary};

/// Message returned for files without a recognized extension.
pub const UNSUPPORTED_FORMAT_MESSAGE: &str = "Unsupported file format";
/// Message returned for requests with neither a file nor complete database fields.
pub const INVALID_REQUEST_MESSAGE: &str = "Invalid request";
/// Message returned for table names that are not plain identifiers.
pub const INVALID_TABLE_NAME_MESSAGE: &str = "Invalid table name";

/// String-keyed map that keeps insertion order and serializes as a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for ColumnMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> ColumnMap<V> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under `key`, replacing (in place) an existing entry.
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for ColumnMap<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<V: Serialize> Serialize for ColumnMap<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Structured summary of a table.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Profile {
    /// Number of rows.
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// Column names in table order.
    pub column_names: Vec<String>,
    /// Number of columns per dtype name, most common first (ties: first appearance).
    pub data_type_counts: ColumnMap<usize>,
    /// Missing entries per column, in column order. Zero counts are present.
    pub missing_value_counts: ColumnMap<usize>,
    /// Numeric summaries for `int64`/`float64` columns only, in column order.
    pub basic_statistics: ColumnMap<NumericSummary>,
}

/// Per-column results computed in parallel.
struct ColumnProfile {
    missing: usize,
    summary: Option<NumericSummary>,
}

fn profile_column(ds: &DataSet, idx: usize) -> ColumnProfile {
    let missing = ds.column(idx).filter(|v| v.is_null()).count();
    let summary = ds.schema.fields[idx]
        .data_type
        .is_numeric()
        .then(|| NumericSummary::from_values(ds.column(idx).filter_map(|v| v.as_f64())));
    ColumnProfile { missing, summary }
}

/// Compute the [`Profile`] of a dataset.
///
/// Columns are processed in parallel; the output only depends on the dataset, so profiling
/// the same dataset twice serializes to identical JSON.
pub fn profile_dataset(ds: &DataSet) -> Profile {
    let column_names: Vec<String> = ds.schema.field_names().map(str::to_owned).collect();

    let mut type_counts: Vec<(&'static str, usize)> = Vec::new();
    for field in &ds.schema.fields {
        let name = field.data_type.dtype_name();
        match type_counts.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 += 1,
            None => type_counts.push((name, 1)),
        }
    }
    // Stable: ties keep first-appearance order.
    type_counts.sort_by(|a, b| b.1.cmp(&a.1));

    let columns: Vec<ColumnProfile> = (0..ds.column_count())
        .into_par_iter()
        .map(|idx| profile_column(ds, idx))
        .collect();

    let mut missing_value_counts = ColumnMap::new();
    let mut basic_statistics = ColumnMap::new();
    for (name, column) in column_names.iter().zip(columns) {
        missing_value_counts.insert(name.clone(), column.missing);
        if let Some(summary) = column.summary {
            basic_statistics.insert(name.clone(), summary);
        }
    }

    Profile {
        row_count: ds.row_count(),
        column_count: ds.column_count(),
        column_names,
        data_type_counts: type_counts.into_iter().collect(),
        missing_value_counts,
        basic_statistics,
    }
}

/// Input to [`profile_source`], resolved once at the entry point.
#[derive(Debug, Clone)]
pub enum TableSource {
    /// A `.csv`, `.xlsx` or `.XLSX` file on disk.
    FromPath(PathBuf),
    /// An already materialized table (e.g. a database result set).
    FromTable(DataSet),
}

/// Error body: `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ErrorPayload {
    /// Human-readable message.
    pub error: String,
}

/// JSON body of a profiling request: a [`Profile`] or an [`ErrorPayload`].
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum ProfileResponse {
    /// Successful profile.
    Profile(Profile),
    /// Domain-level rejection.
    Error(ErrorPayload),
}

impl ProfileResponse {
    /// `{"error": message}`.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(ErrorPayload {
            error: message.into(),
        })
    }

    /// `{"error": "Unsupported file format"}`.
    pub fn unsupported_format() -> Self {
        Self::error(UNSUPPORTED_FORMAT_MESSAGE)
    }

    /// `{"error": "Invalid request"}`.
    pub fn invalid_request() -> Self {
        Self::error(INVALID_REQUEST_MESSAGE)
    }

    /// `{"error": "Invalid table name"}`.
    pub fn invalid_table_name() -> Self {
        Self::error(INVALID_TABLE_NAME_MESSAGE)
    }

    /// The profile, if this is a successful response.
    pub fn profile(&self) -> Option<&Profile> {
        match self {
            Self::Profile(p) => Some(p),
            Self::Error(_) => None,
        }
    }
}

/// Load `source` (if it is a path) and profile it.
///
/// A path without a recognized extension (and no format forced in `options`) is answered with
/// [`ProfileResponse::unsupported_format`] rather than an error. I/O and parse failures are
/// returned as `Err`.
pub fn profile_source(source: TableSource, options: &IngestionOptions) -> IngestionResult<ProfileResponse> {
    let ds = match source {
        TableSource::FromTable(ds) => ds,
        TableSource::FromPath(path) => {
            let recognized = IngestionFormat::from_file_name(&path.to_string_lossy()).is_some();
            if options.format.is_none() && !recognized {
                return Ok(ProfileResponse::unsupported_format());
            }
            ingest_from_path(&path, options)?
        }
    };
    Ok(ProfileResponse::Profile(profile_dataset(&ds)))
}
