//! Batch caption-and-upload items and their per-item outcomes.

use serde::{Deserialize, Serialize};

/// One unit of batch work: an image URL and the caption to burn into it.
/// `filename` may be given in the input CSV; when absent one is derived from
/// the URL.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchItem {
    pub url: String,
    pub text: String,
    #[serde(default)]
    pub filename: Option<String>,
}

impl BatchItem {
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        BatchItem {
            url: url.into(),
            text: text.into(),
            filename: None,
        }
    }
}

/// Terminal classification of one batch item. There are no transitions back:
/// an item is processed once and lands in exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Success,
    UploadFailed,
    ProcessingFailed,
}

impl BatchStatus {
    pub fn is_success(self) -> bool {
        matches!(self, BatchStatus::Success)
    }
}

impl std::fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BatchStatus::Success => "success",
            BatchStatus::UploadFailed => "upload_failed",
            BatchStatus::ProcessingFailed => "processing_failed",
        };
        write!(f, "{}", label)
    }
}

/// What happened to one batch item.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub url: String,
    pub text: String,
    pub filename: String,
    pub drive_file_id: Option<String>,
    pub status: BatchStatus,
}

/// End-of-run accounting for a whole batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub successful: usize,
    pub failed: usize,
    pub total: usize,
    pub outcomes: Vec<BatchOutcome>,
}

impl BatchReport {
    pub fn from_outcomes(outcomes: Vec<BatchOutcome>) -> Self {
        let successful = outcomes.iter().filter(|o| o.status.is_success()).count();
        let total = outcomes.len();
        BatchReport {
            successful,
            failed: total - successful,
            total,
            outcomes,
        }
    }
}
