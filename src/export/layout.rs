//! Line layout shared by every export surface.
//!
//! Coordinates are bottom-up, in points for PDF and pixels for raster canvases.
//! Body line `i` of a page sits at `start_y - i * line_height`; a line fits while
//! that stays at or above `bottom_margin`.

use crate::error::ExportError;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// What happens to lines that run past the bottom margin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Continue on a fresh page with the cursor reset to `start_y`
    #[default]
    Paginate,
    /// Drop the remaining lines
    Clip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub width: u32,
    pub height: u32,
    pub margin_left: i32,
    pub title_y: i32,
    pub start_y: i32,
    pub line_height: i32,
    pub bottom_margin: i32,
    pub title_size: u32,
    pub body_size: u32,
}

impl PageLayout {
    /// US Letter in points.
    pub const PDF_LETTER: PageLayout = PageLayout {
        width: 612,
        height: 792,
        margin_left: 72,
        title_y: 750,
        start_y: 720,
        line_height: 20,
        bottom_margin: 72,
        title_size: 16,
        body_size: 12,
    };

    /// Fixed raster canvas in pixels.
    pub const RASTER_CANVAS: PageLayout = PageLayout {
        width: 600,
        height: 800,
        margin_left: 40,
        title_y: 760,
        start_y: 720,
        line_height: 30,
        bottom_margin: 40,
        title_size: 28,
        body_size: 20,
    };

    /// Body lines that fit on one page; at least one.
    pub fn lines_per_page(&self) -> usize {
        if self.line_height <= 0 || self.start_y < self.bottom_margin {
            return 1;
        }
        ((self.start_y - self.bottom_margin) / self.line_height) as usize + 1
    }

    /// Baseline of body line `slot` on its page.
    pub fn line_y(&self, slot: usize) -> i32 {
        self.start_y - slot as i32 * self.line_height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Title,
    Body,
}

/// One text draw operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement<'a> {
    pub page: usize,
    pub kind: RunKind,
    pub text: &'a str,
    pub x: i32,
    pub y: i32,
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan<'a> {
    pub placements: Vec<Placement<'a>>,
    pub pages: usize,
    /// Non-blank lines dropped by [`OverflowPolicy::Clip`]
    pub clipped_lines: usize,
}

/// Place the title and every line. Blank lines take a slot but draw nothing.
pub fn plan<'a>(
    lines: &[&'a str],
    title: &'a str,
    layout: &PageLayout,
    overflow: OverflowPolicy,
) -> LayoutPlan<'a> {
    let per_page = layout.lines_per_page();
    let mut placements = Vec::with_capacity(lines.len() + 1);
    let mut pages = 1;
    let mut clipped_lines = 0;

    let title = title.trim();
    if !title.is_empty() {
        placements.push(Placement {
            page: 0,
            kind: RunKind::Title,
            text: title,
            x: layout.margin_left,
            y: layout.title_y,
            size: layout.title_size,
        });
    }

    for (index, line) in lines.iter().enumerate() {
        let page = index / per_page;
        let slot = index % per_page;
        let text = line.trim_end();

        if page > 0 && overflow == OverflowPolicy::Clip {
            if !text.trim().is_empty() {
                clipped_lines += 1;
            }
            continue;
        }
        if text.trim().is_empty() {
            continue;
        }

        pages = pages.max(page + 1);
        placements.push(Placement {
            page,
            kind: RunKind::Body,
            text,
            x: layout.margin_left,
            y: layout.line_y(slot),
            size: layout.body_size,
        });
    }

    LayoutPlan {
        placements,
        pages,
        clipped_lines,
    }
}

/// Drawing target for [`render`]
pub trait Surface {
    type Output;

    /// Called once per page, in order, before that page's text.
    fn begin_page(&mut self, page: usize) -> Result<(), ExportError>;

    fn draw_text(&mut self, run: &Placement<'_>) -> Result<(), ExportError>;

    fn finish(self) -> Result<Self::Output, ExportError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    pub pages: usize,
    /// Title plus body draw operations
    pub text_runs: usize,
    pub lines_drawn: usize,
    pub clipped_lines: usize,
}

/// Lay out `lines` under `title` and draw them onto `surface`.
pub fn render<S: Surface>(
    mut surface: S,
    lines: &[&str],
    title: &str,
    layout: &PageLayout,
    overflow: OverflowPolicy,
) -> Result<(S::Output, RenderStats), ExportError> {
    let plan = plan(lines, title, layout, overflow);

    for page in 0..plan.pages {
        surface.begin_page(page)?;
        for run in plan.placements.iter().filter(|run| run.page == page) {
            surface.draw_text(run)?;
        }
    }

    if plan.clipped_lines > 0 {
        warn!(
            clipped = plan.clipped_lines,
            capacity = layout.lines_per_page(),
            "Export content exceeds one page; extra lines were clipped"
        );
    }

    let stats = RenderStats {
        pages: plan.pages,
        text_runs: plan.placements.len(),
        lines_drawn: plan
            .placements
            .iter()
            .filter(|run| run.kind == RunKind::Body)
            .count(),
        clipped_lines: plan.clipped_lines,
    };
    Ok((surface.finish()?, stats))
}

/// A drawn run as captured by [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRun {
    pub page: usize,
    pub kind: RunKind,
    pub text: String,
    pub x: i32,
    pub y: i32,
}

/// Surface that only records what would be drawn; used for previews.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub pages: usize,
    pub runs: Vec<RecordedRun>,
}

impl Surface for RecordingSurface {
    type Output = RecordingSurface;

    fn begin_page(&mut self, _page: usize) -> Result<(), ExportError> {
        self.pages += 1;
        Ok(())
    }

    fn draw_text(&mut self, run: &Placement<'_>) -> Result<(), ExportError> {
        self.runs.push(RecordedRun {
            page: run.page,
            kind: run.kind,
            text: run.text.to_string(),
            x: run.x,
            y: run.y,
        });
        Ok(())
    }

    fn finish(self) -> Result<Self::Output, ExportError> {
        Ok(self)
    }
}
