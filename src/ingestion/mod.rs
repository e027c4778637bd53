//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`ingest_from_path`] (from [`unified`]) which:
//!
//! - detects the format from the file name (`.csv`, `.xlsx`, `.XLSX`), or takes it from
//!   [`IngestionOptions`]
//! - performs ingestion into an in-memory [`crate::types::DataSet`] with inferred column types
//! - optionally reports success/failure/alerts to an [`IngestionObserver`]
//!
//! Database tables are ingested with [`database::ingest_mysql_table`].
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - `excel` (feature `excel`)
//! - [`database`]

pub mod csv;
pub mod database;
#[cfg(feature = "excel")]
pub mod excel;
pub mod infer;
pub mod observability;
pub mod unified;

pub use database::{ingest_mysql_table, DatabaseParams};
pub use observability::{
    IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats, TracingObserver,
};
pub use unified::{ingest_from_path, IngestionFormat, IngestionOptions};
