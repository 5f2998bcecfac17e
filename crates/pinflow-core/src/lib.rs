//! Pinflow Core Library
//!
//! This crate provides the domain models, error type, and configuration
//! shared across all pinflow components.

pub mod config;
pub mod drive_types;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use drive_types::DriveBackend;
pub use error::{AppError, AppResult};
