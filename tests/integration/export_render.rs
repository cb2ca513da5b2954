//! Export renderer integration tests: read the artifacts back and check what was drawn.

use flavour_fusion::export::{export_text, ExportFormat, ExportSettings, OverflowPolicy, PageLayout};
use image::GenericImageView;
use lopdf::content::Content;
use lopdf::{Document, Object};
use std::io::Write;
use tempfile::NamedTempFile;

/// Text-show operations per page, as (text, y) in drawing order.
fn pdf_text_runs(bytes: &[u8]) -> Vec<Vec<(String, i64)>> {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .values()
        .map(|page_id| {
            let content = Content::decode(&doc.get_page_content(*page_id).unwrap()).unwrap();
            let mut runs = Vec::new();
            let mut y = 0;
            for op in &content.operations {
                match op.operator.as_str() {
                    "Td" => y = op.operands[1].as_i64().unwrap(),
                    "Tj" => {
                        let text = match &op.operands[0] {
                            Object::String(bytes, _) => String::from_utf8_lossy(bytes).to_string(),
                            other => panic!("unexpected operand {:?}", other),
                        };
                        runs.push((text, y));
                    }
                    _ => {}
                }
            }
            runs
        })
        .collect()
}

/// Horizontal bands of ink; gaps of up to `max_gap` rows stay in one band.
fn ink_bands(bytes: &[u8], max_gap: u32) -> usize {
    let image = image::load_from_memory(bytes).unwrap();
    let (width, height) = image.dimensions();
    let rgb = image.to_rgb8();

    let mut bands = 0;
    let mut last_ink: Option<u32> = None;
    for y in 0..height {
        let inked = (0..width).any(|x| rgb.get_pixel(x, y).0.iter().any(|c| *c < 128));
        if inked {
            match last_ink {
                Some(prev) if y - prev <= max_gap + 1 => {}
                _ => bands += 1,
            }
            last_ink = Some(y);
        }
    }
    bands
}

#[test]
fn test_shopping_list_pdf_has_four_text_operations() {
    let artifact = export_text(
        "Eggs\nMilk\nFlour",
        ExportFormat::Pdf,
        &ExportSettings::default(),
    )
    .unwrap();

    assert_eq!(artifact.content_type(), "application/pdf");
    assert_eq!(artifact.file_name(), "shopping_list.pdf");

    let pages = pdf_text_runs(&artifact.bytes);
    assert_eq!(pages.len(), 1);
    let runs = &pages[0];
    assert_eq!(runs.len(), 4);
    assert_eq!(runs[0].0, "Shopping List");
    assert_eq!(
        runs[1..].iter().map(|(t, _)| t.as_str()).collect::<Vec<_>>(),
        vec!["Eggs", "Milk", "Flour"]
    );
    for pair in runs.windows(2) {
        assert!(pair[0].1 > pair[1].1, "y must strictly decrease");
    }
    for pair in runs[1..].windows(2) {
        assert_eq!(
            pair[0].1 - pair[1].1,
            i64::from(PageLayout::PDF_LETTER.line_height)
        );
    }
}

#[test]
fn test_pdf_is_byte_identical_across_renders() {
    let settings = ExportSettings::default();
    let text = "Tomatoes\nBasil\n\nOlive oil\nCrème fraîche";
    let first = export_text(text, ExportFormat::Pdf, &settings).unwrap();
    let second = export_text(text, ExportFormat::Pdf, &settings).unwrap();
    assert_eq!(first.bytes, second.bytes);
}

#[test]
fn test_pdf_recovers_one_plus_non_blank_lines() {
    let text = "Eggs\n\nMilk\n   \nFlour\nSugar";
    let artifact = export_text(text, ExportFormat::Pdf, &ExportSettings::default()).unwrap();
    let runs: usize = pdf_text_runs(&artifact.bytes).iter().map(Vec::len).sum();
    assert_eq!(runs, 1 + 4);
    assert_eq!(artifact.stats.lines_drawn, 4);
}

#[test]
fn test_pdf_paginates_long_lists() {
    let text = (1..=40)
        .map(|i| format!("Item {}", i))
        .collect::<Vec<_>>()
        .join("\n");
    let artifact = export_text(&text, ExportFormat::Pdf, &ExportSettings::default()).unwrap();

    let pages = pdf_text_runs(&artifact.bytes);
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].len(), 1 + 33);
    assert_eq!(pages[1].len(), 7);
    assert_eq!(pages[1][0], ("Item 34".to_string(), 720));
    assert_eq!(artifact.stats.clipped_lines, 0);

    let bottom = i64::from(PageLayout::PDF_LETTER.bottom_margin);
    assert!(pages.iter().flatten().all(|(_, y)| *y >= bottom));
}

#[test]
fn test_pdf_clip_policy_keeps_one_page() {
    let text = (1..=40)
        .map(|i| format!("Item {}", i))
        .collect::<Vec<_>>()
        .join("\n");
    let settings = ExportSettings {
        overflow: OverflowPolicy::Clip,
        ..ExportSettings::default()
    };
    let artifact = export_text(&text, ExportFormat::Pdf, &settings).unwrap();

    assert_eq!(pdf_text_runs(&artifact.bytes).len(), 1);
    assert_eq!(artifact.stats.clipped_lines, 7);
}

#[test]
fn test_png_with_missing_font_still_renders() {
    let settings = ExportSettings {
        font_path: Some("/definitely/not/here.ttf".into()),
        ..ExportSettings::default()
    };
    let artifact = export_text("Eggs\nMilk\nFlour", ExportFormat::Png, &settings).unwrap();

    assert_eq!(artifact.content_type(), "image/png");
    let image = image::load_from_memory(&artifact.bytes).unwrap();
    assert_eq!(image.dimensions(), (600, 800));
    assert_eq!(ink_bands(&artifact.bytes, 3), 4);
}

#[test]
fn test_png_with_invalid_font_falls_back() {
    let mut font = NamedTempFile::new().unwrap();
    font.write_all(b"not a font file").unwrap();
    let settings = ExportSettings {
        font_path: Some(font.path().to_path_buf()),
        ..ExportSettings::default()
    };
    let artifact = export_text("Eggs\n\nFlour", ExportFormat::Png, &settings).unwrap();
    assert_eq!(ink_bands(&artifact.bytes, 3), 1 + 2);
}

#[test]
fn test_jpeg_export() {
    let artifact = export_text(
        "Eggs\nMilk",
        ExportFormat::Jpeg,
        &ExportSettings {
            jpeg_quality: 75,
            ..ExportSettings::default()
        },
    )
    .unwrap();
    assert_eq!(artifact.file_name(), "shopping_list.jpg");
    assert_eq!(artifact.content_type(), "image/jpeg");
    let image = image::load_from_memory(&artifact.bytes).unwrap();
    assert_eq!(image.dimensions(), (600, 800));
}

#[test]
fn test_raster_clips_beyond_one_canvas() {
    let text = (1..=30)
        .map(|i| format!("Item {}", i))
        .collect::<Vec<_>>()
        .join("\n");
    let artifact = export_text(&text, ExportFormat::Png, &ExportSettings::default()).unwrap();
    assert_eq!(artifact.stats.pages, 1);
    assert_eq!(artifact.stats.lines_drawn, 23);
    assert_eq!(artifact.stats.clipped_lines, 7);
}
