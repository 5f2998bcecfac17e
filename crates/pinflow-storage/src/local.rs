//! Local filesystem drive implementation.
//!
//! Stands in for the remote drive during tests and credential-less runs.
//! Identifiers are freshly generated UUIDs; the "remote" file lands under
//! the configured base directory.

use std::path::PathBuf;

use async_trait::async_trait;
use pinflow_core::DriveBackend;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::traits::{validate_filename, Drive, DriveError, DriveResult};

#[derive(Clone)]
pub struct LocalDrive {
    base_path: PathBuf,
}

impl LocalDrive {
    /// Create a new LocalDrive rooted at `base_path`, creating it if needed.
    pub async fn new(base_path: impl Into<PathBuf>) -> DriveResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            DriveError::ConfigError(format!(
                "Failed to create drive directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalDrive { base_path })
    }
}

#[async_trait]
impl Drive for LocalDrive {
    async fn create_file(
        &self,
        filename: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> DriveResult<String> {
        validate_filename(filename)?;

        let path = self.base_path.join(filename);
        let size = data.len();
        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            DriveError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            DriveError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            DriveError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        let file_id = Uuid::new_v4().to_string();

        tracing::info!(
            path = %path.display(),
            file_id = %file_id,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local drive upload successful"
        );

        Ok(file_id)
    }

    fn backend_type(&self) -> DriveBackend {
        DriveBackend::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_local_drive_create_file() {
        let dir = tempdir().unwrap();
        let drive = LocalDrive::new(dir.path()).await.unwrap();

        let data = b"png bytes".to_vec();
        let id = drive
            .create_file("pin_1.png", "image/png", data.clone())
            .await
            .unwrap();

        assert!(Uuid::parse_str(&id).is_ok());
        let written = std::fs::read(dir.path().join("pin_1.png")).unwrap();
        assert_eq!(written, data);
    }

    #[tokio::test]
    async fn test_local_drive_rejects_traversal() {
        let dir = tempdir().unwrap();
        let drive = LocalDrive::new(dir.path()).await.unwrap();

        let result = drive
            .create_file("../escape.png", "image/png", vec![1, 2, 3])
            .await;
        assert!(matches!(result, Err(DriveError::InvalidFilename(_))));
    }

    #[tokio::test]
    async fn test_local_drive_creates_missing_base_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let drive = LocalDrive::new(&nested).await.unwrap();

        drive
            .create_file("pin_2.png", "image/png", vec![0])
            .await
            .unwrap();
        assert!(nested.join("pin_2.png").exists());
    }
}
