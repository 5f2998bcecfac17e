//! HTTP drive implementation.
//!
//! Talks to a remote drive's file-creation endpoint: one multipart POST with
//! a JSON metadata part ({name, parents}) and a media part carrying the
//! bytes under their declared MIME type. The response body's `id` field is
//! the remote identifier handed back to the caller.

use std::time::Duration;

use async_trait::async_trait;
use pinflow_core::DriveBackend;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::traits::{validate_filename, Drive, DriveError, DriveResult};

const UPLOAD_TIMEOUT_SECS: u64 = 60;

#[derive(Clone)]
pub struct HttpDrive {
    client: reqwest::Client,
    endpoint: String,
    token: String,
    folder_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreateFileResponse {
    id: String,
}

impl HttpDrive {
    /// Create a new HttpDrive client.
    ///
    /// `folder_id`, when set, files every upload under that remote folder;
    /// otherwise files land in the drive root.
    pub fn new(
        endpoint: String,
        token: String,
        folder_id: Option<String>,
    ) -> DriveResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(UPLOAD_TIMEOUT_SECS))
            .build()
            .map_err(|e| DriveError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(HttpDrive {
            client,
            endpoint,
            token,
            folder_id,
        })
    }

    fn metadata_json(&self, filename: &str) -> String {
        let mut metadata = serde_json::Map::new();
        metadata.insert("name".to_string(), serde_json::Value::from(filename));
        if let Some(folder_id) = &self.folder_id {
            metadata.insert(
                "parents".to_string(),
                serde_json::Value::from(vec![folder_id.clone()]),
            );
        }
        serde_json::Value::Object(metadata).to_string()
    }
}

#[async_trait]
impl Drive for HttpDrive {
    async fn create_file(
        &self,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> DriveResult<String> {
        validate_filename(filename)?;

        let size = data.len();
        let start = std::time::Instant::now();

        let metadata_part = Part::text(self.metadata_json(filename))
            .mime_str("application/json")
            .map_err(|e| DriveError::UploadFailed(format!("Invalid metadata part: {}", e)))?;
        let media_part = Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|e| DriveError::UploadFailed(format!("Invalid media type {}: {}", content_type, e)))?;

        let form = Form::new()
            .part("metadata", metadata_part)
            .part("media", media_part);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| DriveError::UploadFailed(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DriveError::UploadFailed(format!(
                "Drive returned status {}: {}",
                status, body
            )));
        }

        let created: CreateFileResponse = response
            .json()
            .await
            .map_err(|e| DriveError::UploadFailed(format!("Malformed drive response: {}", e)))?;

        tracing::info!(
            filename = %filename,
            file_id = %created.id,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Drive upload successful"
        );

        Ok(created.id)
    }

    fn backend_type(&self) -> DriveBackend {
        DriveBackend::Http
    }
}
