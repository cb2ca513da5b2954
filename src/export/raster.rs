//! Single-canvas raster surface.

use super::glyphs::GlyphSource;
use super::layout::{PageLayout, Placement, Surface};
use crate::error::ExportError;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

const PAPER: Rgb<u8> = Rgb([255, 255, 255]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterEncoding {
    Png,
    Jpeg { quality: u8 },
}

pub struct RasterSurface<'g> {
    canvas: RgbImage,
    layout: PageLayout,
    glyphs: &'g GlyphSource,
    encoding: RasterEncoding,
}

impl<'g> RasterSurface<'g> {
    pub fn new(layout: PageLayout, glyphs: &'g GlyphSource, encoding: RasterEncoding) -> Self {
        Self {
            canvas: RgbImage::from_pixel(layout.width, layout.height, PAPER),
            layout,
            glyphs,
            encoding,
        }
    }
}

impl Surface for RasterSurface<'_> {
    type Output = Vec<u8>;

    fn begin_page(&mut self, page: usize) -> Result<(), ExportError> {
        if page > 0 {
            return Err(ExportError::PageUnsupported(page));
        }
        Ok(())
    }

    fn draw_text(&mut self, run: &Placement<'_>) -> Result<(), ExportError> {
        if run.page > 0 {
            return Err(ExportError::PageUnsupported(run.page));
        }
        // Layout is bottom-up; the canvas is top-down.
        let baseline = self.layout.height as i32 - run.y;
        self.glyphs.draw_text(
            &mut self.canvas,
            run.text,
            run.x as f32,
            baseline as f32,
            run.size as f32,
        );
        Ok(())
    }

    fn finish(self) -> Result<Self::Output, ExportError> {
        let mut bytes = Vec::new();
        match self.encoding {
            RasterEncoding::Png => {
                self.canvas
                    .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
            }
            RasterEncoding::Jpeg { quality } => {
                let encoder = JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100));
                self.canvas.write_with_encoder(encoder)?;
            }
        }
        Ok(bytes)
    }
}
