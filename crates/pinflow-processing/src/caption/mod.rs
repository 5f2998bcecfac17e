pub mod layout;
pub mod renderer;

pub use layout::CaptionStyle;
pub use renderer::{CaptionRenderer, OutlinedCaption};
