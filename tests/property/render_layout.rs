//! Layout properties over arbitrary shopping lists

use flavour_fusion::export::{plan, OverflowPolicy, PageLayout, RunKind};
use proptest::prelude::*;

/// Lines mixing words, blanks and whitespace-only entries.
fn line_lists() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            3 => "[A-Za-z0-9 ,.-]{1,30}",
            1 => Just(String::new()),
            1 => Just("   ".to_string()),
        ],
        0..120,
    )
}

fn non_blank(lines: &[String]) -> usize {
    lines.iter().filter(|line| !line.trim().is_empty()).count()
}

#[test]
fn test_body_lines_sit_on_their_slot() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&line_lists(), |lines| {
            let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
            for layout in [PageLayout::PDF_LETTER, PageLayout::RASTER_CANVAS] {
                let per_page = layout.lines_per_page();
                let layout_plan = plan(&refs, "Shopping List", &layout, OverflowPolicy::Paginate);

                let mut body = layout_plan
                    .placements
                    .iter()
                    .filter(|p| p.kind == RunKind::Body);
                for (index, line) in refs.iter().enumerate() {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let placement = body.next().expect("one placement per non-blank line");
                    assert_eq!(placement.page, index / per_page);
                    assert_eq!(
                        placement.y,
                        layout.start_y - (index % per_page) as i32 * layout.line_height
                    );
                    assert_eq!(placement.text, line.trim_end());
                }
                assert!(body.next().is_none());
            }
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_nothing_drawn_below_bottom_margin() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(line_lists(), prop_oneof![
                Just(OverflowPolicy::Paginate),
                Just(OverflowPolicy::Clip)
            ]),
            |(lines, overflow)| {
                let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
                for layout in [PageLayout::PDF_LETTER, PageLayout::RASTER_CANVAS] {
                    let layout_plan = plan(&refs, "Title", &layout, overflow);
                    for placement in &layout_plan.placements {
                        assert!(placement.y >= layout.bottom_margin);
                        assert!(placement.y <= layout.title_y);
                        assert!(placement.page < layout_plan.pages);
                    }
                }
                Ok(())
            },
        )
        .unwrap();
}

#[test]
fn test_paginate_draws_every_line() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&line_lists(), |lines| {
            let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
            let layout = PageLayout::PDF_LETTER;
            let layout_plan = plan(&refs, "Title", &layout, OverflowPolicy::Paginate);

            let drawn = layout_plan
                .placements
                .iter()
                .filter(|p| p.kind == RunKind::Body)
                .count();
            assert_eq!(drawn, non_blank(&lines));
            assert_eq!(layout_plan.clipped_lines, 0);

            let titles: Vec<_> = layout_plan
                .placements
                .iter()
                .filter(|p| p.kind == RunKind::Title)
                .collect();
            assert_eq!(titles.len(), 1);
            assert_eq!(titles[0].page, 0);
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_clip_accounts_for_every_line() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&line_lists(), |lines| {
            let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
            let layout = PageLayout::RASTER_CANVAS;
            let layout_plan = plan(&refs, "Title", &layout, OverflowPolicy::Clip);

            let drawn = layout_plan
                .placements
                .iter()
                .filter(|p| p.kind == RunKind::Body)
                .count();
            assert_eq!(drawn + layout_plan.clipped_lines, non_blank(&lines));
            assert_eq!(layout_plan.pages, 1);
            assert!(layout_plan.placements.iter().all(|p| p.page == 0));
            Ok(())
        })
        .unwrap();
}
