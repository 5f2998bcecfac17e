//! Outlined caption rendering.

use std::io::Cursor;
use std::path::PathBuf;

use ab_glyph::{FontVec, PxScale};
use image::{DynamicImage, ImageFormat, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use pinflow_core::{AppError, AppResult};

use super::layout::{anchor, outline_kernel, CaptionStyle};
use crate::fonts::resolve_font;

/// Seam between orchestration and pixel work: anything that can turn image
/// bytes plus a caption into finished PNG bytes.
pub trait CaptionRenderer: Send + Sync {
    fn render(&self, image_bytes: &[u8], caption: &str) -> AppResult<Vec<u8>>;
}

/// The production renderer: outline-kernel draws in the outline color, one
/// fill draw on top, PNG out.
pub struct OutlinedCaption {
    font: FontVec,
    style: CaptionStyle,
}

impl OutlinedCaption {
    pub fn new(font: FontVec, style: CaptionStyle) -> Self {
        OutlinedCaption { font, style }
    }

    /// Build a renderer from an ordered font candidate list.
    pub fn from_candidates(candidates: &[PathBuf], style: CaptionStyle) -> AppResult<Self> {
        let (font, path) = resolve_font(candidates)?;
        tracing::info!(font = %path.display(), "Caption font resolved");
        Ok(OutlinedCaption::new(font, style))
    }

    /// Draw the caption onto a decoded image.
    ///
    /// No wrapping: a caption wider than the image overflows and is clipped
    /// at the edges.
    pub fn draw(&self, image: DynamicImage, caption: &str) -> RgbImage {
        let mut canvas = image.to_rgb8();
        let (width, height) = canvas.dimensions();

        let scale = PxScale::from(self.style.font_px(width) as f32);
        let (text_w, text_h) = text_size(scale, &self.font, caption);
        let (x, y) = anchor((width, height), (text_w, text_h), self.style.bottom_padding);

        for (dx, dy) in outline_kernel(self.style.outline_radius) {
            draw_text_mut(
                &mut canvas,
                self.style.outline,
                x + dx,
                y + dy,
                scale,
                &self.font,
                caption,
            );
        }
        draw_text_mut(&mut canvas, self.style.fill, x, y, scale, &self.font, caption);

        canvas
    }
}

impl CaptionRenderer for OutlinedCaption {
    fn render(&self, image_bytes: &[u8], caption: &str) -> AppResult<Vec<u8>> {
        let image = image::load_from_memory(image_bytes)
            .map_err(|e| AppError::Parse(format!("Invalid image: {}", e)))?;

        let canvas = self.draw(image, caption);

        let mut out = Vec::new();
        DynamicImage::ImageRgb8(canvas)
            .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .map_err(|e| AppError::Parse(format!("PNG encode failed: {}", e)))?;
        Ok(out)
    }
}
