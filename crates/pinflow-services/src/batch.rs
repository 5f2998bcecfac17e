//! Caption batch: fetch → caption → upload, one item at a time.
//!
//! Continue policy: an item failure becomes its terminal status and the
//! batch moves on, which is the opposite of the ingest orchestrator's abort.
//! A fixed
//! politeness delay separates items.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use pinflow_core::models::{BatchItem, BatchOutcome, BatchReport, BatchStatus};
use pinflow_core::{AppError, AppResult};
use pinflow_processing::CaptionRenderer;
use pinflow_storage::Drive;

use crate::fetch::MediaFetcher;

const UPLOAD_CONTENT_TYPE: &str = "image/png";

pub struct BatchProcessor {
    fetcher: Arc<dyn MediaFetcher>,
    renderer: Arc<dyn CaptionRenderer>,
    drive: Arc<dyn Drive>,
    delay: Duration,
}

impl BatchProcessor {
    pub fn new(
        fetcher: Arc<dyn MediaFetcher>,
        renderer: Arc<dyn CaptionRenderer>,
        drive: Arc<dyn Drive>,
        delay: Duration,
    ) -> Self {
        BatchProcessor {
            fetcher,
            renderer,
            drive,
            delay,
        }
    }

    /// Process items strictly in input order and return the full accounting.
    pub async fn process(&self, items: &[BatchItem]) -> BatchReport {
        let total = items.len();
        tracing::info!(total, "Starting batch processing");

        let mut outcomes = Vec::with_capacity(total);
        for (index, item) in items.iter().enumerate() {
            let position = index + 1;
            let filename = item
                .filename
                .clone()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| generate_filename(&item.url, position));

            tracing::info!(position, total, filename = %filename, "Processing batch item");
            outcomes.push(self.process_item(item, filename).await);

            if position < total && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        let report = BatchReport::from_outcomes(outcomes);
        tracing::info!(
            successful = report.successful,
            failed = report.failed,
            total = report.total,
            "Batch complete"
        );
        report
    }

    async fn process_item(&self, item: &BatchItem, filename: String) -> BatchOutcome {
        let rendered = match self.fetch_and_caption(item).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(url = %item.url, error = %e, "Processing failed");
                return BatchOutcome {
                    url: item.url.clone(),
                    text: item.text.clone(),
                    filename,
                    drive_file_id: None,
                    status: BatchStatus::ProcessingFailed,
                };
            }
        };

        match self
            .drive
            .create_file(&filename, UPLOAD_CONTENT_TYPE, rendered)
            .await
        {
            Ok(file_id) => {
                tracing::info!(filename = %filename, file_id = %file_id, "Uploaded");
                BatchOutcome {
                    url: item.url.clone(),
                    text: item.text.clone(),
                    filename,
                    drive_file_id: Some(file_id),
                    status: BatchStatus::Success,
                }
            }
            Err(e) => {
                tracing::error!(filename = %filename, error = %e, "Upload failed");
                BatchOutcome {
                    url: item.url.clone(),
                    text: item.text.clone(),
                    filename,
                    drive_file_id: None,
                    status: BatchStatus::UploadFailed,
                }
            }
        }
    }

    async fn fetch_and_caption(&self, item: &BatchItem) -> AppResult<Vec<u8>> {
        let bytes = self.fetcher.fetch(&item.url).await?;

        // pixel work off the async thread
        let renderer = Arc::clone(&self.renderer);
        let caption = item.text.clone();
        tokio::task::spawn_blocking(move || renderer.render(&bytes, &caption))
            .await
            .map_err(|e| AppError::Parse(format!("Caption task failed: {}", e)))?
    }
}

/// Filename for an item that did not bring one: `pin_<path-stem>_<n>.png`
/// from the URL's last path segment, else zero-padded `pin_<nnn>.png`.
pub fn generate_filename(url: &str, position: usize) -> String {
    let stem = match reqwest::Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .map(|segment| match segment.rsplit_once('.') {
                Some((stem, _)) => stem.to_string(),
                None => segment.to_string(),
            })
            .unwrap_or_default(),
        Err(_) => String::new(),
    };

    if stem.is_empty() {
        format!("pin_{:03}.png", position)
    } else {
        format!("pin_{}_{}.png", stem, position)
    }
}

/// Load batch items from a CSV with the required `url`, `text`, `filename`
/// columns. Extra columns are tolerated; missing required ones are a parse
/// failure.
pub fn load_batch_csv(path: &Path) -> AppResult<Vec<BatchItem>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        AppError::Filesystem(format!("Failed to open CSV {}: {}", path.display(), e))
    })?;

    let headers = reader
        .headers()
        .map_err(|e| AppError::Parse(format!("Unreadable CSV header in {}: {}", path.display(), e)))?
        .clone();
    for required in ["url", "text", "filename"] {
        if !headers.iter().any(|h| h == required) {
            return Err(AppError::Parse(format!(
                "CSV must have columns url, text, filename; missing {}",
                required
            )));
        }
    }

    let mut items = Vec::new();
    for row in reader.deserialize() {
        let item: BatchItem = row
            .map_err(|e| AppError::Parse(format!("Invalid CSV row in {}: {}", path.display(), e)))?;
        items.push(item);
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn filename_from_url_path_stem() {
        assert_eq!(
            generate_filename("https://example.com/images/photo.jpg", 2),
            "pin_photo_2.png"
        );
        assert_eq!(
            generate_filename("https://example.com/blog/cover", 5),
            "pin_cover_5.png"
        );
    }

    #[test]
    fn filename_falls_back_to_padded_index() {
        assert_eq!(generate_filename("https://example.com/", 3), "pin_003.png");
        assert_eq!(generate_filename("not a url", 12), "pin_012.png");
    }

    #[test]
    fn csv_loads_items_and_tolerates_empty_filename() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("batch.csv");
        std::fs::write(
            &path,
            "url,text,filename\nhttps://example.com/a.jpg,First pin,custom.png\nhttps://example.com/b.jpg,Second pin,\n",
        )
        .unwrap();

        let items = load_batch_csv(&path).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].filename.as_deref(), Some("custom.png"));
        assert_eq!(items[1].text, "Second pin");
    }

    #[test]
    fn csv_missing_required_column_is_a_parse_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("batch.csv");
        std::fs::write(&path, "url,caption\nhttps://example.com/a.jpg,First\n").unwrap();

        let err = load_batch_csv(&path).unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
        assert!(err.to_string().contains("text"));
    }
}
