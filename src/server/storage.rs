//! Persisting uploaded files.
//!
//! Files are stored under a generated name (`<uuid>.<ext>`); the caller-supplied filename only
//! decides the extension and never reaches the filesystem.

use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::ingestion::IngestionFormat;

/// Generated storage name for a file of `format`.
pub fn storage_file_name(format: IngestionFormat) -> io::Result<String> {
    let ext = format.file_extension().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{format:?} is not a file format"),
        )
    })?;
    Ok(format!("{}.{ext}", Uuid::new_v4()))
}

/// Write `bytes` into `upload_dir` under a generated name and return the full path.
///
/// Stored files are never cleaned up.
pub async fn store_upload(
    upload_dir: &Path,
    format: IngestionFormat,
    bytes: &[u8],
) -> io::Result<PathBuf> {
    let path = upload_dir.join(storage_file_name(format)?);
    tokio::fs::write(&path, bytes).await?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_names_are_unique_and_keep_the_format() {
        let a = storage_file_name(IngestionFormat::Csv).unwrap();
        let b = storage_file_name(IngestionFormat::Csv).unwrap();
        assert_ne!(a, b);
        assert!(a.ends_with(".csv"));
        assert!(storage_file_name(IngestionFormat::Excel).unwrap().ends_with(".xlsx"));
        assert!(storage_file_name(IngestionFormat::MySql).is_err());
    }

    #[tokio::test]
    async fn store_upload_writes_inside_upload_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let path = store_upload(tmp.path(), IngestionFormat::Csv, b"a,b\n1,2\n")
            .await
            .unwrap();
        assert_eq!(path.parent(), Some(tmp.path()));
        assert_eq!(std::fs::read(&path).unwrap(), b"a,b\n1,2\n");
    }
}
