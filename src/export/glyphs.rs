//! Glyph sources for the raster surface.

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{Rgb, RgbImage};
use std::path::Path;
use tracing::{debug, warn};

const INK: [u8; 3] = [0, 0, 0];

/// Where raster glyphs come from
pub enum GlyphSource {
    /// A TrueType/OpenType font read from disk
    Outline(FontVec),
    /// The built-in 8x8 bitmap typeface
    Bitmap,
}

impl GlyphSource {
    /// Load the font at `path`; any problem falls back to the bitmap typeface.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            debug!("No export font configured, using bitmap glyphs");
            return GlyphSource::Bitmap;
        };

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Font file unreadable, using bitmap glyphs");
                return GlyphSource::Bitmap;
            }
        };

        match FontVec::try_from_vec(bytes) {
            Ok(font) => GlyphSource::Outline(font),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Font file invalid, using bitmap glyphs");
                GlyphSource::Bitmap
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, GlyphSource::Bitmap)
    }

    /// Draw `text` with its baseline at `baseline` (top-down pixels).
    pub fn draw_text(&self, canvas: &mut RgbImage, text: &str, x: f32, baseline: f32, size: f32) {
        match self {
            GlyphSource::Outline(font) => draw_outline(font, canvas, text, x, baseline, size),
            GlyphSource::Bitmap => draw_bitmap(canvas, text, x, baseline, size),
        }
    }
}

fn draw_outline(font: &FontVec, canvas: &mut RgbImage, text: &str, x: f32, baseline: f32, size: f32) {
    let scale = PxScale::from(size);
    let scaled = font.as_scaled(scale);
    let mut caret = x;
    let mut previous = None;

    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(previous) = previous {
            caret += scaled.kern(previous, id);
        }
        let glyph = id.with_scale_and_position(scale, point(caret, baseline));
        caret += scaled.h_advance(id);
        previous = Some(id);

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            let left = bounds.min.x as i32;
            let top = bounds.min.y as i32;
            outlined.draw(|gx, gy, coverage| {
                blend(canvas, left + gx as i32, top + gy as i32, coverage);
            });
        }
    }
}

/// Bitmap glyphs are scaled by whole pixels; row 7 of each cell is the descender row.
fn draw_bitmap(canvas: &mut RgbImage, text: &str, x: f32, baseline: f32, size: f32) {
    let scale = ((size / 8.0).round() as i32).max(1);
    let top = baseline.round() as i32 - 7 * scale;
    let mut left = x.round() as i32;

    for ch in text.chars() {
        let rows = BASIC_FONTS
            .get(ch)
            .or_else(|| LATIN_FONTS.get(ch))
            .or_else(|| BASIC_FONTS.get('?'));
        if let Some(rows) = rows {
            for (row, bits) in rows.iter().enumerate() {
                for column in 0..8 {
                    if bits & (1 << column) == 0 {
                        continue;
                    }
                    let cell_x = left + column * scale;
                    let cell_y = top + row as i32 * scale;
                    for dy in 0..scale {
                        for dx in 0..scale {
                            blend(canvas, cell_x + dx, cell_y + dy, 1.0);
                        }
                    }
                }
            }
        }
        left += 8 * scale;
    }
}

fn blend(canvas: &mut RgbImage, x: i32, y: i32, coverage: f32) {
    if x < 0 || y < 0 || x as u32 >= canvas.width() || y as u32 >= canvas.height() {
        return;
    }
    let coverage = coverage.clamp(0.0, 1.0);
    let pixel = canvas.get_pixel_mut(x as u32, y as u32);
    let Rgb(current) = *pixel;
    let mut mixed = [0u8; 3];
    for channel in 0..3 {
        let value = f32::from(current[channel]) * (1.0 - coverage) + f32::from(INK[channel]) * coverage;
        mixed[channel] = value.round() as u8;
    }
    *pixel = Rgb(mixed);
}
