//! Drive abstraction trait
//!
//! This module defines the Drive trait all upload backends implement.

use async_trait::async_trait;
use pinflow_core::{AppError, DriveBackend};
use thiserror::Error;

/// Drive operation errors
#[derive(Debug, Error)]
pub enum DriveError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for drive operations
pub type DriveResult<T> = Result<T, DriveError>;

impl From<DriveError> for AppError {
    fn from(err: DriveError) -> Self {
        AppError::Upload(err.to_string())
    }
}

/// Drive abstraction trait
///
/// A drive accepts a finished file and returns the remote identifier the
/// backend assigned to it. The destination folder, endpoint, and credentials
/// are fixed at construction; `create_file` is a one-shot call with no
/// retry; the caller decides what a failure means.
#[async_trait]
pub trait Drive: Send + Sync {
    /// Create a remote file and return its identifier
    async fn create_file(
        &self,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> DriveResult<String>;

    /// Get the drive backend type
    fn backend_type(&self) -> DriveBackend;
}

/// Reject filenames that would escape the destination folder.
pub(crate) fn validate_filename(filename: &str) -> DriveResult<()> {
    if filename.is_empty()
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
    {
        return Err(DriveError::InvalidFilename(filename.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_validation() {
        validate_filename("pin_1.png").unwrap();
        assert!(validate_filename("").is_err());
        assert!(validate_filename("../escape.png").is_err());
        assert!(validate_filename("dir/file.png").is_err());
        assert!(validate_filename("dir\\file.png").is_err());
    }

    #[test]
    fn drive_error_maps_to_upload_kind() {
        let err: AppError = DriveError::UploadFailed("quota".to_string()).into();
        assert!(matches!(err, AppError::Upload(_)));
        assert!(err.to_string().contains("quota"));
    }
}
