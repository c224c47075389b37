use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while scanning a media tree or writing its report.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The path disappeared between listing and the size query.
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The scan root does not exist or is not a directory.
    #[error("invalid scan root: {}", path.display())]
    InvalidPath { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to persist report: {0}")]
    Persist(#[from] tempfile::PersistError),
}

impl ScanError {
    /// Map an I/O error for `path`, keeping `NotFound` distinct so callers can
    /// treat a vanished entry as a per-entry failure.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            ScanError::NotFound { path }
        } else {
            ScanError::Io { path, source }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ScanError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_not_found() {
        let err = ScanError::from_io(
            "/gone/file.mkv",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "file not found: /gone/file.mkv");
    }

    #[test]
    fn test_from_io_other() {
        let err = ScanError::from_io(
            "/locked",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_not_found());
        assert!(matches!(err, ScanError::Io { .. }));
    }
}
