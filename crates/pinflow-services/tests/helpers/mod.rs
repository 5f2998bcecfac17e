//! In-memory stand-ins for the network, the renderer, and the drive.
#![allow(dead_code)] // each test binary uses its own subset

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use pinflow_core::{AppError, AppResult, DriveBackend};
use pinflow_processing::CaptionRenderer;
use pinflow_services::MediaFetcher;
use pinflow_storage::{Drive, DriveError, DriveResult};

/// Returns fixed bytes for every URL except the ones told to fail.
pub struct MockFetcher {
    pub payload: &'static [u8],
    pub fail_urls: HashSet<String>,
}

impl MockFetcher {
    pub fn ok() -> Self {
        MockFetcher {
            payload: b"image-bytes",
            fail_urls: HashSet::new(),
        }
    }

    pub fn failing_on(urls: &[&str]) -> Self {
        MockFetcher {
            payload: b"image-bytes",
            fail_urls: urls.iter().map(|u| u.to_string()).collect(),
        }
    }
}

#[async_trait]
impl MediaFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> AppResult<Bytes> {
        if self.fail_urls.contains(url) {
            return Err(AppError::Network(format!("{} unreachable", url)));
        }
        Ok(Bytes::from_static(self.payload))
    }
}

/// Hands the input bytes back untouched; batch tests do not need pixels.
pub struct PassthroughRenderer;

impl CaptionRenderer for PassthroughRenderer {
    fn render(&self, image_bytes: &[u8], _caption: &str) -> AppResult<Vec<u8>> {
        Ok(image_bytes.to_vec())
    }
}

/// Records created filenames; optionally refuses every upload.
pub struct RecordingDrive {
    pub created: Mutex<Vec<String>>,
    pub fail: bool,
}

impl RecordingDrive {
    pub fn ok() -> Self {
        RecordingDrive {
            created: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        RecordingDrive {
            created: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

#[async_trait]
impl Drive for RecordingDrive {
    async fn create_file(
        &self,
        filename: &str,
        _content_type: &str,
        _data: Vec<u8>,
    ) -> DriveResult<String> {
        if self.fail {
            return Err(DriveError::UploadFailed("quota exhausted".to_string()));
        }
        let mut created = self.created.lock().unwrap();
        created.push(filename.to_string());
        Ok(format!("file-{}", created.len()))
    }

    fn backend_type(&self) -> DriveBackend {
        DriveBackend::Local
    }
}
