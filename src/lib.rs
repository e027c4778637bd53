//! `data-profiler` turns a tabular source into a JSON profile: shape, column names, dtype
//! counts, missing values per column and descriptive statistics for numeric columns.
//!
//! Sources are ingested into an in-memory [`types::DataSet`] whose column types are inferred
//! from the data, then summarized by [`profiling::profile_dataset`]. The [`server`] module wraps
//! this in an HTTP API (`POST /upload`).
//!
//! ## What you can profile
//!
//! - **CSV**: `.csv`, comma separated, first row is the header
//! - **Excel** (Cargo feature `excel`, on by default): `.xlsx` / `.XLSX`, first worksheet
//! - **MySQL tables** (Cargo feature `mysql`, on by default): `SELECT * FROM <table>`
//!
//! ## Type inference
//!
//! Every column gets one of four dtypes, reported by name in the profile:
//!
//! - [`types::DataType::Int64`] (`int64`): all present values are integers
//! - [`types::DataType::Float64`] (`float64`): all present values are numeric, or the column is
//!   integer with missing values, or every value is missing
//! - [`types::DataType::Bool`] (`bool`): all values are `True`/`False` and none are missing
//! - [`types::DataType::Object`] (`object`): anything else
//!
//! Empty cells and the usual NA markers (`NA`, `N/A`, `NaN`, `null`, ...) are missing values
//! ([`types::Value::Null`]).
//!
//! ## Quick example
//!
//! ```no_run
//! use data_profiler::ingestion::{ingest_from_path, IngestionOptions};
//! use data_profiler::profiling::profile_dataset;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ds = ingest_from_path("data.csv", &IngestionOptions::default())?;
//! let profile = profile_dataset(&ds);
//! println!("{}", serde_json::to_string_pretty(&profile)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: unified ingestion entrypoint, CSV / Excel / MySQL readers, observers
//! - [`profiling`]: profile computation and the JSON response types
//! - [`server`]: axum router, upload handling and configuration
//! - [`types`]: schema and in-memory dataset types
//! - [`error`]: error types used across ingestion

pub mod error;
pub mod ingestion;
pub mod profiling;
pub mod server;
pub mod types;

pub use error::{IngestionError, IngestionResult};
