//! Unified ingestion entrypoint.
//!
//! Most callers should use [`ingest_from_path`], which ingests a file into an in-memory
//! [`crate::types::DataSet`] with inferred column types.
//!
//! - If [`IngestionOptions::format`] is `None`, the ingestion format is inferred from the file
//!   name (see [`IngestionFormat::from_file_name`]).
//! - If an [`super::observability::IngestionObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::error::Error as StdError;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{IngestionError, IngestionResult};
use crate::types::DataSet;

use super::csv;
use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};

/// Supported ingestion formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionFormat {
    /// Comma-separated values.
    Csv,
    /// Excel workbook, first worksheet (feature-gated behind `excel`).
    Excel,
    /// `SELECT * FROM <table>` on a MySQL-compatible server (feature-gated behind `mysql`).
    MySql,
}

impl IngestionFormat {
    /// Detect a file format from a file name or path.
    ///
    /// The check is case-sensitive: only `.csv`, `.xlsx` and `.XLSX` are recognized.
    pub fn from_file_name(name: &str) -> Option<Self> {
        if name.ends_with(".csv") {
            Some(Self::Csv)
        } else if name.ends_with(".xlsx") || name.ends_with(".XLSX") {
            Some(Self::Excel)
        } else {
            None
        }
    }

    /// Extension used when persisting a file of this format, if it is a file format.
    pub fn file_extension(self) -> Option<&'static str> {
        match self {
            Self::Csv => Some("csv"),
            Self::Excel => Some("xlsx"),
            Self::MySql => None,
        }
    }
}

/// Options controlling unified ingestion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// If `None`, detect format from the file name.
    pub format: Option<IngestionFormat>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Unified ingestion entry point for path-based sources.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use data_profiler::ingestion::{ingest_from_path, IngestionOptions};
///
/// # fn main() -> Result<(), data_profiler::IngestionError> {
/// // Uses `.csv` to select CSV ingestion.
/// let ds = ingest_from_path("people.csv", &IngestionOptions::default())?;
/// println!("rows={} columns={}", ds.row_count(), ds.column_count());
/// # Ok(())
/// # }
/// ```
///
/// A path without a recognized extension is rejected before any I/O:
///
/// ```
/// use data_profiler::ingestion::{ingest_from_path, IngestionOptions};
/// use data_profiler::IngestionError;
///
/// let err = ingest_from_path("report.txt", &IngestionOptions::default()).unwrap_err();
/// assert!(matches!(err, IngestionError::UnsupportedFormat { .. }));
/// ```
pub fn ingest_from_path(path: impl AsRef<Path>, options: &IngestionOptions) -> IngestionResult<DataSet> {
    let path = path.as_ref();
    let source = path.display().to_string();
    let fmt = match options.format {
        Some(f) => f,
        None => IngestionFormat::from_file_name(&source)
            .ok_or_else(|| IngestionError::UnsupportedFormat { path: source.clone() })?,
    };

    let ctx = IngestionContext { source, format: fmt };

    let result = match fmt {
        IngestionFormat::Csv => csv::ingest_csv_from_path(path),
        IngestionFormat::Excel => ingest_excel_dispatch(path),
        IngestionFormat::MySql => Err(IngestionError::UnsupportedFormat { path: ctx.source.clone() }),
    };

    report_outcome(options, &ctx, &result);
    result
}

/// Forward an ingestion result to the configured observer, if any.
pub(crate) fn report_outcome(
    options: &IngestionOptions,
    ctx: &IngestionContext,
    result: &IngestionResult<DataSet>,
) {
    let Some(obs) = options.observer.as_ref() else {
        return;
    };

    match result {
        Ok(ds) => obs.on_success(
            ctx,
            IngestionStats {
                rows: ds.row_count(),
                columns: ds.column_count(),
            },
        ),
        Err(e) => {
            let sev = severity_for_error(e);
            obs.on_failure(ctx, sev, e);
            if sev >= options.alert_at_or_above {
                obs.on_alert(ctx, sev, e);
            }
        }
    }
}

fn severity_for_error(e: &IngestionError) -> IngestionSeverity {
    match e {
        IngestionError::Io(_) => IngestionSeverity::Critical,
        IngestionError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
            _ => IngestionSeverity::Error,
        },
        #[cfg(feature = "excel")]
        IngestionError::Excel(err) => {
            if error_chain_contains_io(err) {
                IngestionSeverity::Critical
            } else {
                IngestionSeverity::Error
            }
        }
        #[cfg(feature = "mysql")]
        IngestionError::Database(err) => match err {
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::Protocol(_) => {
                IngestionSeverity::Critical
            }
            _ => IngestionSeverity::Error,
        },
        IngestionError::UnsupportedFormat { .. }
        | IngestionError::InvalidIdentifier { .. }
        | IngestionError::Malformed { .. } => IngestionSeverity::Error,
    }
}

#[cfg_attr(not(feature = "excel"), allow(dead_code))]
fn error_chain_contains_io(e: &(dyn StdError + 'static)) -> bool {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(e);
    while let Some(err) = cur {
        if err.is::<std::io::Error>() {
            return true;
        }
        cur = err.source();
    }
    false
}

fn ingest_excel_dispatch(path: &Path) -> IngestionResult<DataSet> {
    #[cfg(feature = "excel")]
    {
        super::excel::ingest_excel_from_path(path)
    }

    #[cfg(not(feature = "excel"))]
    {
        let _ = path;
        Err(IngestionError::Malformed {
            message: "excel ingestion not enabled (enable cargo feature 'excel')".to_string(),
        })
    }
}
