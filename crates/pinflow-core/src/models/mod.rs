pub mod batch;
pub mod pin;

pub use batch::{BatchItem, BatchOutcome, BatchReport, BatchStatus};
pub use pin::{PinCsvRow, PinDocument, PinRecord};
