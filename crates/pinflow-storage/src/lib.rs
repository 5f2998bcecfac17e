//! Pinflow Storage Library
//!
//! Drive abstraction and implementations: uploads go through the [`Drive`]
//! trait so orchestrators never couple to a concrete backend. The `http`
//! backend talks to a remote drive's file-creation API; the `local` backend
//! writes into a directory so the pipeline runs without credentials.

pub mod factory;
#[cfg(feature = "drive-http")]
pub mod http;
#[cfg(feature = "drive-local")]
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_drive;
#[cfg(feature = "drive-http")]
pub use http::HttpDrive;
#[cfg(feature = "drive-local")]
pub use local::LocalDrive;
pub use pinflow_core::DriveBackend;
pub use traits::{Drive, DriveError, DriveResult};
