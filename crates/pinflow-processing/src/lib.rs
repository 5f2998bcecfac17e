//! Pinflow Processing Library
//!
//! Caption overlay: layout arithmetic, font resolution, and the outlined
//! text renderer that turns (image bytes, caption) into a finished PNG.

pub mod caption;
pub mod fonts;

// Re-export commonly used types
pub use caption::{CaptionRenderer, CaptionStyle, OutlinedCaption};
pub use fonts::resolve_font;
