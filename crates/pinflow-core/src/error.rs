//! Error types module
//!
//! One closed error enum covers every failure the workflow can hit: network,
//! filesystem, parse, upload. Callers decide abort-vs-continue per
//! orchestrator; the error itself carries no policy.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Network failure: {0}")]
    Network(String),

    #[error("Filesystem failure: {0}")]
    Filesystem(String),

    #[error("Parse failure: {0}")]
    Parse(String),

    #[error("Upload failure: {0}")]
    Upload(String),
}

/// Result type for workflow operations
pub type AppResult<T> = Result<T, AppError>;

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Filesystem(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(format!("JSON error: {}", err))
    }
}

impl AppError {
    /// Get the error kind name for summaries and structured logs
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Network(_) => "Network",
            AppError::Filesystem(_) => "Filesystem",
            AppError::Parse(_) => "Parse",
            AppError::Upload(_) => "Upload",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_maps_to_filesystem() {
        let err: AppError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, AppError::Filesystem(_)));
        assert_eq!(err.error_type(), "Filesystem");
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn json_error_maps_to_parse() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert!(matches!(err, AppError::Parse(_)));
        assert_eq!(err.error_type(), "Parse");
    }

    #[test]
    fn display_includes_kind() {
        let err = AppError::Upload("remote said no".to_string());
        assert_eq!(err.to_string(), "Upload failure: remote said no");
    }
}
