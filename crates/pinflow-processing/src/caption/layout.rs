//! Caption placement arithmetic.

use image::Rgb;

/// How a caption is sized and placed on an image.
///
/// Two presets exist because the two original tools scale differently:
/// `banner` is the batch uploader's subtle strip, `poster` the standalone
/// renderer's oversized treatment. The formulas are intentionally not
/// unified.
#[derive(Debug, Clone)]
pub struct CaptionStyle {
    /// Font size as a fraction of image width
    pub width_ratio: f32,
    /// Lower bound on the computed font size, in pixels
    pub min_font_px: u32,
    /// Outline kernel radius: offsets within this Chebyshev distance get an
    /// outline-colored draw
    pub outline_radius: i32,
    /// Gap between the text's bottom edge and the image's bottom edge
    pub bottom_padding: u32,
    pub fill: Rgb<u8>,
    pub outline: Rgb<u8>,
}

impl CaptionStyle {
    /// Batch-uploader sizing: `max(24, width * 0.04)`, 2 px outline, 30 px
    /// bottom padding.
    pub fn banner() -> Self {
        CaptionStyle {
            width_ratio: 0.04,
            min_font_px: 24,
            outline_radius: 2,
            bottom_padding: 30,
            fill: Rgb([255, 255, 255]),
            outline: Rgb([0, 0, 0]),
        }
    }

    /// Standalone-renderer sizing: `max(40, width * 0.08)`, 3 px outline,
    /// 60 px bottom padding.
    pub fn poster() -> Self {
        CaptionStyle {
            width_ratio: 0.08,
            min_font_px: 40,
            outline_radius: 3,
            bottom_padding: 60,
            fill: Rgb([255, 255, 255]),
            outline: Rgb([0, 0, 0]),
        }
    }

    /// Font size in pixels for an image of the given width.
    pub fn font_px(&self, image_width: u32) -> u32 {
        ((image_width as f32 * self.width_ratio) as u32).max(self.min_font_px)
    }
}

/// Offsets of the outline kernel: every integer pair within `radius`,
/// excluding (0, 0). Drawing the caption once per offset in the outline
/// color fakes a stroke around the final fill draw.
pub fn outline_kernel(radius: i32) -> Vec<(i32, i32)> {
    let mut offsets = Vec::with_capacity(((2 * radius + 1) * (2 * radius + 1) - 1) as usize);
    for dx in -radius..=radius {
        for dy in -radius..=radius {
            if dx != 0 || dy != 0 {
                offsets.push((dx, dy));
            }
        }
    }
    offsets
}

/// Anchor of the text block: centered horizontally, `bottom_padding` above
/// the bottom edge. Coordinates may go negative when the caption is wider
/// than the image; the overflow is drawn clipped, not corrected.
pub fn anchor(
    (image_w, image_h): (u32, u32),
    (text_w, text_h): (u32, u32),
    bottom_padding: u32,
) -> (i32, i32) {
    let x = (image_w as i32 - text_w as i32) / 2;
    let y = image_h as i32 - text_h as i32 - bottom_padding as i32;
    (x, y)
}
