use thiserror::Error;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Error type returned by ingestion functions.
///
/// A single error enum shared across CSV, Excel (optional) and MySQL (optional) ingestion.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "excel")]
    /// Excel ingestion error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// CSV ingestion error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "mysql")]
    /// Database connection or query error (feature-gated behind `mysql`).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The path does not end in a recognized extension.
    #[error("unsupported file format: {path}")]
    UnsupportedFormat { path: String },

    /// A table name that is not a plain (optionally schema-qualified) SQL identifier.
    #[error("invalid table identifier '{name}'")]
    InvalidIdentifier { name: String },

    /// The input has a shape that cannot be turned into a table (no header, ragged rows, ...).
    #[error("malformed input: {message}")]
    Malformed { message: String },
}
