//! Export renderer
//!
//! Turns plain text (normally the shopping list) into a downloadable artifact:
//! a PDF document or a PNG/JPEG image. One layout loop serves every surface.

use crate::error::ExportError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

mod glyphs;
mod layout;
mod pdf;
mod raster;

pub use glyphs::GlyphSource;
pub use layout::{
    plan, render, LayoutPlan, OverflowPolicy, PageLayout, Placement, RecordedRun,
    RecordingSurface, RenderStats, RunKind, Surface,
};
pub use pdf::{encode_win_ansi, PdfSurface};
pub use raster::{RasterEncoding, RasterSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Png,
    #[value(alias = "jpg")]
    Jpeg,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Pdf, ExportFormat::Png, ExportFormat::Jpeg];

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "shopping_list.pdf",
            ExportFormat::Png => "shopping_list.png",
            ExportFormat::Jpeg => "shopping_list.jpg",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
        }
    }

    pub fn layout(&self) -> PageLayout {
        match self {
            ExportFormat::Pdf => PageLayout::PDF_LETTER,
            ExportFormat::Png | ExportFormat::Jpeg => PageLayout::RASTER_CANVAS,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "png" => Ok(ExportFormat::Png),
            "jpeg" | "jpg" => Ok(ExportFormat::Jpeg),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// `[export]` configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Heading drawn on the first page
    pub title: String,
    /// TrueType/OpenType font for raster exports
    pub font_path: Option<PathBuf>,
    /// PDF overflow handling; raster exports always clip
    pub overflow: OverflowPolicy,
    pub jpeg_quality: u8,
    /// Default directory for written artifacts
    pub output_dir: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            title: "Shopping List".to_string(),
            font_path: None,
            overflow: OverflowPolicy::Paginate,
            jpeg_quality: 90,
            output_dir: PathBuf::from("."),
        }
    }
}

/// A rendered export, ready to write or serve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
    pub stats: RenderStats,
}

impl ExportArtifact {
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }

    pub fn file_name(&self) -> &'static str {
        self.format.file_name()
    }
}

/// Split text on line breaks. A trailing newline does not add a line.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

/// Render `text` into `format`.
pub fn export_text(
    text: &str,
    format: ExportFormat,
    settings: &ExportSettings,
) -> Result<ExportArtifact, ExportError> {
    let lines = split_lines(text);
    let layout = format.layout();
    debug!(format = %format, lines = lines.len(), "Rendering export");

    let (bytes, stats) = match format {
        ExportFormat::Pdf => render(
            PdfSurface::new(layout, &settings.title),
            &lines,
            &settings.title,
            &layout,
            settings.overflow,
        )?,
        ExportFormat::Png | ExportFormat::Jpeg => {
            let glyphs = GlyphSource::load(settings.font_path.as_deref());
            let encoding = match format {
                ExportFormat::Jpeg => RasterEncoding::Jpeg {
                    quality: settings.jpeg_quality,
                },
                _ => RasterEncoding::Png,
            };
            render(
                RasterSurface::new(layout, &glyphs, encoding),
                &lines,
                &settings.title,
                &layout,
                OverflowPolicy::Clip,
            )?
        }
    };

    info!(
        format = %format,
        bytes = bytes.len(),
        pages = stats.pages,
        lines_drawn = stats.lines_drawn,
        lines_clipped = stats.clipped_lines,
        "Export rendered"
    );

    Ok(ExportArtifact {
        format,
        bytes,
        stats,
    })
}

/// Lay out `text` without encoding anything.
pub fn preview(
    text: &str,
    format: ExportFormat,
    settings: &ExportSettings,
) -> Result<(RecordingSurface, RenderStats), ExportError> {
    let lines = split_lines(text);
    let layout = format.layout();
    let overflow = match format {
        ExportFormat::Pdf => settings.overflow,
        ExportFormat::Png | ExportFormat::Jpeg => OverflowPolicy::Clip,
    };
    render(
        RecordingSurface::default(),
        &lines,
        &settings.title,
        &layout,
        overflow,
    )
}
