//! Pin ingest: download images for every matching JSON file, rewrite the
//! JSON with download locations, export a CSV summary, archive the JSON.
//!
//! Abort policy: the first failing file ends the whole run (`?` out of the
//! file loop). Within a file, the first failing image ends that file. This
//! is deliberate and local to this orchestrator; the caption batch makes
//! the opposite choice.

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use pinflow_core::models::{PinDocument, PinRecord};
use pinflow_core::{AppError, AppResult, Config};
use regex::Regex;

use crate::export::write_pin_csv;
use crate::fetch::MediaFetcher;
use crate::sequence::{extension_for_url, next_sequence_number};

/// Pick-up gate for source files: `YYYY-MM-DD_<name>.json`.
const FILE_GATE_PATTERN: &str = r"^(\d{4}-\d{2}-\d{2})_\w+\.json$";

/// End-of-run accounting for an ingest invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestReport {
    pub files_processed: usize,
    pub images_downloaded: usize,
}

/// Compile the source-filename gate.
pub fn ingest_filename_gate() -> AppResult<Regex> {
    Regex::new(FILE_GATE_PATTERN)
        .map_err(|e| AppError::Parse(format!("Failed to compile filename gate: {}", e)))
}

/// A name passes the gate when it matches the pattern and its date digits
/// form a real calendar date.
pub fn matches_gate(gate: &Regex, filename: &str) -> bool {
    match gate.captures(filename) {
        Some(captures) => NaiveDate::parse_from_str(&captures[1], "%Y-%m-%d").is_ok(),
        None => false,
    }
}

pub struct PinIngest {
    fetcher: Arc<dyn MediaFetcher>,
    config: Config,
}

impl PinIngest {
    pub fn new(fetcher: Arc<dyn MediaFetcher>, config: Config) -> Self {
        PinIngest { fetcher, config }
    }

    /// Process every matching JSON file in the source folder, in name order.
    pub async fn run(&self) -> AppResult<IngestReport> {
        let gate = ingest_filename_gate()?;

        let source_dir = &self.config.source_dir;
        if !source_dir.is_dir() {
            return Err(AppError::Filesystem(format!(
                "Source folder does not exist: {}",
                source_dir.display()
            )));
        }

        let mut filenames = Vec::new();
        let entries = std::fs::read_dir(source_dir).map_err(|e| {
            AppError::Filesystem(format!("Failed to read {}: {}", source_dir.display(), e))
        })?;
        for entry in entries {
            let entry = entry.map_err(|e| {
                AppError::Filesystem(format!("Failed to read {}: {}", source_dir.display(), e))
            })?;
            if let Some(name) = entry.file_name().to_str() {
                if matches_gate(&gate, name) {
                    filenames.push(name.to_string());
                }
            }
        }
        filenames.sort();

        if filenames.is_empty() {
            tracing::info!(dir = %source_dir.display(), "No matching JSON files found");
            return Ok(IngestReport::default());
        }

        tracing::info!(count = filenames.len(), "Found JSON files to process");

        let mut report = IngestReport::default();
        for filename in &filenames {
            let path = source_dir.join(filename);
            tracing::info!(file = %filename, "Processing JSON file");
            // first failing file aborts the whole run
            let images = self.process_file(&path, filename).await?;
            report.files_processed += 1;
            report.images_downloaded += images;
            tracing::info!(file = %filename, images, "Successfully processed");
        }

        Ok(report)
    }

    /// One file: load → download each image under the next sequence number →
    /// rewrite the JSON with locations → export CSV → archive.
    async fn process_file(&self, path: &Path, filename: &str) -> AppResult<usize> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::Filesystem(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let mut document: PinDocument = serde_json::from_str(&raw)
            .map_err(|e| AppError::Parse(format!("Invalid JSON in {}: {}", path.display(), e)))?;
        tracing::info!(entries = document.len(), "Loaded pin document");

        let mut next = next_sequence_number(&self.config.images_dir)?;

        for (url, value) in document.iter_mut() {
            let mut record: PinRecord = serde_json::from_value(value.clone())?;

            let image_filename = format!("{}{}", next, extension_for_url(url));
            let destination = self.config.images_dir.join(&image_filename);

            let bytes = self.fetcher.fetch(url).await?;
            tokio::fs::write(&destination, &bytes).await.map_err(|e| {
                AppError::Filesystem(format!("Failed to write {}: {}", destination.display(), e))
            })?;

            record.location = Some(destination.to_string_lossy().into_owned());
            *value = serde_json::to_value(&record)?;

            tracing::info!(url = %url, file = %image_filename, "Processed image");
            next += 1;
        }

        // Rewrite in place before archiving; a failure here leaves the
        // downloaded images on disk (recorded product decision).
        let pretty = serde_json::to_string_pretty(&document)?;
        tokio::fs::write(path, pretty).await.map_err(|e| {
            AppError::Filesystem(format!("Failed to rewrite {}: {}", path.display(), e))
        })?;
        tracing::info!(file = %filename, "Updated JSON file with location data");

        write_pin_csv(&document, filename, &self.config.csv_dir)?;

        self.archive_file(path, filename).await?;

        Ok(document.len())
    }

    async fn archive_file(&self, path: &Path, filename: &str) -> AppResult<()> {
        let processed_dir = &self.config.processed_dir;
        tokio::fs::create_dir_all(processed_dir).await.map_err(|e| {
            AppError::Filesystem(format!("Failed to create {}: {}", processed_dir.display(), e))
        })?;

        let target = processed_dir.join(filename);
        if tokio::fs::rename(path, &target).await.is_err() {
            // rename fails across filesystems; fall back to copy + remove
            tokio::fs::copy(path, &target).await.map_err(|e| {
                AppError::Filesystem(format!("Failed to archive {}: {}", path.display(), e))
            })?;
            tokio::fs::remove_file(path).await.map_err(|e| {
                AppError::Filesystem(format!("Failed to remove {}: {}", path.display(), e))
            })?;
        }

        tracing::info!(target = %target.display(), "Moved JSON file to processed folder");
        Ok(())
    }
}
