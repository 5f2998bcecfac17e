//! Config-driven drive construction.

#[cfg(feature = "drive-http")]
use crate::HttpDrive;
#[cfg(feature = "drive-local")]
use crate::LocalDrive;
use crate::{Drive, DriveBackend, DriveError, DriveResult};
use pinflow_core::Config;
use std::sync::Arc;

/// Create a drive backend based on configuration
pub async fn create_drive(config: &Config) -> DriveResult<Arc<dyn Drive>> {
    match config.drive_backend {
        #[cfg(feature = "drive-http")]
        DriveBackend::Http => {
            let endpoint = config.drive_endpoint.clone().ok_or_else(|| {
                DriveError::ConfigError("PINFLOW_DRIVE_ENDPOINT not configured".to_string())
            })?;
            let token = config.drive_token.clone().ok_or_else(|| {
                DriveError::ConfigError("PINFLOW_DRIVE_TOKEN not configured".to_string())
            })?;

            let drive = HttpDrive::new(endpoint, token, config.drive_folder_id.clone())?;
            Ok(Arc::new(drive))
        }

        #[cfg(not(feature = "drive-http"))]
        DriveBackend::Http => Err(DriveError::ConfigError(
            "HTTP drive backend not available (drive-http feature not enabled)".to_string(),
        )),

        #[cfg(feature = "drive-local")]
        DriveBackend::Local => {
            let base_path = config.local_drive_dir.clone().ok_or_else(|| {
                DriveError::ConfigError("PINFLOW_LOCAL_DRIVE_DIR not configured".to_string())
            })?;

            let drive = LocalDrive::new(base_path).await?;
            Ok(Arc::new(drive))
        }

        #[cfg(not(feature = "drive-local"))]
        DriveBackend::Local => Err(DriveError::ConfigError(
            "Local drive backend not available (drive-local feature not enabled)".to_string(),
        )),
    }
}

#[cfg(all(test, feature = "drive-local"))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_local_drive_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            local_drive_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        };

        let drive = create_drive(&config).await.unwrap();
        assert_eq!(drive.backend_type(), DriveBackend::Local);
    }

    #[cfg(feature = "drive-http")]
    #[tokio::test]
    async fn http_backend_requires_endpoint() {
        let config = Config {
            drive_backend: DriveBackend::Http,
            ..Config::default()
        };

        let result = create_drive(&config).await;
        assert!(matches!(result, Err(DriveError::ConfigError(_))));
    }
}
