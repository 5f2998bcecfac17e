//! Pinflow Services Library
//!
//! The workflow orchestrators and their collaborators: media fetching, the
//! filename sequencer, CSV export, pin ingest, and the caption batch.

pub mod batch;
pub mod export;
pub mod fetch;
pub mod ingest;
pub mod sequence;

// Re-export commonly used types
pub use batch::{load_batch_csv, BatchProcessor};
pub use export::write_pin_csv;
pub use fetch::{HttpFetcher, MediaFetcher};
pub use ingest::PinIngest;
pub use sequence::{extension_for_url, next_sequence_number};
