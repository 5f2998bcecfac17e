//! Drive backend selection.

use std::fmt;
use std::str::FromStr;

/// Which drive backend uploads go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveBackend {
    /// Remote drive over its HTTP file-creation API
    Http,
    /// Local directory standing in for a drive (no credentials needed)
    Local,
}

impl FromStr for DriveBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(DriveBackend::Http),
            "local" => Ok(DriveBackend::Local),
            other => Err(format!("unknown drive backend: {}", other)),
        }
    }
}

impl fmt::Display for DriveBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriveBackend::Http => write!(f, "http"),
            DriveBackend::Local => write!(f, "local"),
        }
    }
}
