//! Server configuration.

use std::path::{Path, PathBuf};

/// Default upload directory, relative to the working directory.
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Default request body limit in MiB.
pub const DEFAULT_MAX_UPLOAD_MB: usize = 64;

/// Server configuration, built once at startup and passed into [`super::AppState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Directory uploaded files are stored in.
    pub upload_dir: PathBuf,
    /// Maximum accepted request body in bytes; `None` means unbounded.
    pub max_upload_bytes: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_UPLOAD_DIR).with_max_upload_mb(DEFAULT_MAX_UPLOAD_MB)
    }
}

impl ServerConfig {
    /// Configuration with the given upload directory and no size limit.
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            max_upload_bytes: None,
        }
    }

    /// Limit request bodies to `mb` MiB; `0` removes the limit.
    pub fn with_max_upload_mb(mut self, mb: usize) -> Self {
        self.max_upload_bytes = (mb > 0).then(|| mb_to_bytes(mb));
        self
    }

    /// Create the upload directory (and parents) if it does not exist.
    pub fn ensure_upload_dir(&self) -> std::io::Result<&Path> {
        std::fs::create_dir_all(&self.upload_dir)?;
        Ok(&self.upload_dir)
    }
}

fn mb_to_bytes(mb: usize) -> usize {
    // Saturates at usize::MAX.
    mb.saturating_mul(1024).saturating_mul(1024)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_megabytes_means_unbounded() {
        let cfg = ServerConfig::new("u").with_max_upload_mb(0);
        assert_eq!(cfg.max_upload_bytes, None);
        let cfg = ServerConfig::new("u").with_max_upload_mb(2);
        assert_eq!(cfg.max_upload_bytes, Some(2 * 1024 * 1024));
        assert_eq!(mb_to_bytes(usize::MAX), usize::MAX);
    }

    #[test]
    fn default_uses_uploads_dir_and_limit() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.upload_dir, PathBuf::from("uploads"));
        assert_eq!(cfg.max_upload_bytes, Some(64 * 1024 * 1024));
    }

    #[test]
    fn ensure_upload_dir_creates_nested_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = ServerConfig::new(tmp.path().join("a").join("uploads"));
        let dir = cfg.ensure_upload_dir().unwrap();
        assert!(dir.is_dir());
        // Idempotent.
        cfg.ensure_upload_dir().unwrap();
    }
}
