//! Configuration module
//!
//! Every entry point takes an explicit [`Config`]; there is no global
//! mutable state. Values come from `PINFLOW_*` environment variables with
//! defaults suitable for a local run against the `local` drive backend.

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context};

use crate::drive_types::DriveBackend;

// Common constants
const DEFAULT_SOURCE_DIR: &str = "pins/json";
const DEFAULT_IMAGES_DIR: &str = "pins/images";
const DEFAULT_PROCESSED_DIR: &str = "pins/processed";
const DEFAULT_CSV_DIR: &str = "pins/csv";
const DEFAULT_LOCAL_DRIVE_DIR: &str = "pins/drive";
const DEFAULT_BATCH_DELAY_SECS: u64 = 1;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Ordered candidate font paths tried first-to-last, mirroring the usual
/// Windows, macOS, Linux install locations.
const DEFAULT_FONT_CANDIDATES: &[&str] = &[
    "C:\\Windows\\Fonts\\arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
];

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Folder scanned for `YYYY-MM-DD_<name>.json` pin files
    pub source_dir: PathBuf,
    /// Folder receiving sequentially numbered image downloads
    pub images_dir: PathBuf,
    /// Folder ingest JSON files are archived into after processing
    pub processed_dir: PathBuf,
    /// Folder receiving the CSV summaries
    pub csv_dir: PathBuf,
    // Drive configuration
    pub drive_backend: DriveBackend,
    pub drive_endpoint: Option<String>,
    pub drive_token: Option<String>,
    pub drive_folder_id: Option<String>,
    pub local_drive_dir: Option<PathBuf>,
    // Behavior knobs
    pub batch_delay_secs: u64,
    pub fetch_timeout_secs: u64,
    /// Ordered candidate font files; first readable TrueType wins
    pub font_candidates: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            processed_dir: PathBuf::from(DEFAULT_PROCESSED_DIR),
            csv_dir: PathBuf::from(DEFAULT_CSV_DIR),
            drive_backend: DriveBackend::Local,
            drive_endpoint: None,
            drive_token: None,
            drive_folder_id: None,
            local_drive_dir: Some(PathBuf::from(DEFAULT_LOCAL_DRIVE_DIR)),
            batch_delay_secs: DEFAULT_BATCH_DELAY_SECS,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            font_candidates: DEFAULT_FONT_CANDIDATES.iter().map(PathBuf::from).collect(),
        }
    }
}

fn env_path(key: &str, default: &str) -> PathBuf {
    env::var(key).map(PathBuf::from).unwrap_or_else(|_| PathBuf::from(default))
}

fn env_u64(key: &str, default: u64) -> anyhow::Result<u64> {
    match env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("{} must be an integer, got {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// Load configuration from `PINFLOW_*` environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let drive_backend = match env::var("PINFLOW_DRIVE_BACKEND") {
            Ok(raw) => raw
                .parse::<DriveBackend>()
                .map_err(|e| anyhow::anyhow!("PINFLOW_DRIVE_BACKEND: {}", e))?,
            Err(_) => DriveBackend::Local,
        };

        let font_candidates = match env::var("PINFLOW_FONTS") {
            Ok(raw) => env::split_paths(&raw).collect(),
            Err(_) => DEFAULT_FONT_CANDIDATES.iter().map(PathBuf::from).collect(),
        };

        let config = Config {
            source_dir: env_path("PINFLOW_SOURCE_DIR", DEFAULT_SOURCE_DIR),
            images_dir: env_path("PINFLOW_IMAGES_DIR", DEFAULT_IMAGES_DIR),
            processed_dir: env_path("PINFLOW_PROCESSED_DIR", DEFAULT_PROCESSED_DIR),
            csv_dir: env_path("PINFLOW_CSV_DIR", DEFAULT_CSV_DIR),
            drive_backend,
            drive_endpoint: env::var("PINFLOW_DRIVE_ENDPOINT").ok(),
            drive_token: env::var("PINFLOW_DRIVE_TOKEN").ok(),
            drive_folder_id: env::var("PINFLOW_DRIVE_FOLDER_ID").ok(),
            local_drive_dir: env::var("PINFLOW_LOCAL_DRIVE_DIR")
                .map(PathBuf::from)
                .ok()
                .or_else(|| Some(PathBuf::from(DEFAULT_LOCAL_DRIVE_DIR))),
            batch_delay_secs: env_u64("PINFLOW_BATCH_DELAY_SECS", DEFAULT_BATCH_DELAY_SECS)?,
            fetch_timeout_secs: env_u64("PINFLOW_FETCH_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT_SECS)?,
            font_candidates,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field requirements that `from_env` alone cannot express.
    pub fn validate(&self) -> anyhow::Result<()> {
        match self.drive_backend {
            DriveBackend::Http => {
                if self.drive_endpoint.as_deref().unwrap_or("").is_empty() {
                    bail!("PINFLOW_DRIVE_ENDPOINT is required for the http drive backend");
                }
                if self.drive_token.as_deref().unwrap_or("").is_empty() {
                    bail!("PINFLOW_DRIVE_TOKEN is required for the http drive backend");
                }
            }
            DriveBackend::Local => {
                if self.local_drive_dir.is_none() {
                    bail!("PINFLOW_LOCAL_DRIVE_DIR is required for the local drive backend");
                }
            }
        }

        if self.fetch_timeout_secs == 0 {
            bail!("PINFLOW_FETCH_TIMEOUT_SECS must be greater than zero");
        }

        if self.font_candidates.is_empty() {
            bail!("PINFLOW_FONTS must list at least one candidate font path");
        }

        Ok(())
    }
}
