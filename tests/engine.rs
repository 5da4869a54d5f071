use pdf_annotator::config::StyleConfig;
use pdf_annotator::{AnnotationEngine, FrameBuffer, PixelSurface, Point, PointerEvent, Region};
use proptest::prelude::*;

const PAGE: u32 = 0x00_F0_F0_F0;
const INK: u32 = 0x00_FF_00_00;

fn region() -> Region {
    Region { x1: 250, y1: 50, x2: 600, y2: 125 }
}

/// A blank "rendered page" with the default region highlighted.
fn highlighted_page() -> AnnotationEngine {
    let mut engine = AnnotationEngine::new(
        FrameBuffer::filled(800, 200, PAGE),
        vec![region()],
        &StyleConfig::default(),
    );
    engine.highlight_regions();
    engine
}

fn drag(engine: &mut AnnotationEngine, from: (i32, i32), to: (i32, i32), step: i32) {
    let start = Point::new(from.0, from.1);
    engine.dispatch(PointerEvent::Press(start));
    let steps = ((to.0 - from.0).abs().max((to.1 - from.1).abs()) / step).max(1);
    for i in 1..=steps {
        let x = from.0 + (to.0 - from.0) * i / steps;
        let y = from.1 + (to.1 - from.1) * i / steps;
        engine.dispatch(PointerEvent::Move(Point::new(x, y)));
    }
    engine.dispatch(PointerEvent::Release(Point::new(to.0, to.1)));
}

#[test]
fn empty_undo_after_highlight_is_idempotent() {
    let mut engine = highlighted_page();
    let after_highlight = engine.surface().snapshot();
    assert!(!engine.undo());
    assert_eq!(engine.surface().snapshot(), after_highlight);
}

#[test]
fn drag_out_of_region_paints_only_inside() {
    let mut engine = highlighted_page();
    let before = engine.surface().clone();

    drag(&mut engine, (300, 80), (700, 80), 7);

    let after = engine.surface();
    assert_eq!(after.pixel(400, 80), Some(INK));
    assert_eq!(after.pixel(590, 80), Some(INK));
    for y in 0..after.height as i32 {
        for x in 0..after.width as i32 {
            if after.pixel(x, y) != before.pixel(x, y) {
                assert!(region().contains(x, y), "ink escaped to ({x}, {y})");
            }
        }
    }
}

#[test]
fn stroke_joining_two_regions_skips_the_gap() {
    let left = Region { x1: 100, y1: 50, x2: 200, y2: 150 };
    let right = Region { x1: 400, y1: 50, x2: 500, y2: 150 };
    let mut engine = AnnotationEngine::new(
        FrameBuffer::filled(600, 200, PAGE),
        vec![left, right],
        &StyleConfig::default(),
    );
    engine.highlight_regions();
    let before = engine.surface().clone();

    // Two samples only: one in each region, so the segment crosses the gap.
    engine.dispatch(PointerEvent::Press(Point::new(150, 100)));
    engine.dispatch(PointerEvent::Move(Point::new(450, 100)));
    engine.dispatch(PointerEvent::Release(Point::new(450, 100)));

    let after = engine.surface();
    assert_eq!(after.pixel(180, 100), Some(INK));
    assert_eq!(after.pixel(420, 100), Some(INK));
    assert_eq!(after.pixel(300, 100), before.pixel(300, 100));
}

#[test]
fn undo_restores_pre_stroke_pixels() {
    let mut engine = highlighted_page();
    let before = engine.surface().snapshot();

    drag(&mut engine, (260, 60), (590, 120), 5);
    assert_ne!(engine.surface().snapshot(), before);
    assert_eq!(engine.undo_depth(), 1);

    assert!(engine.undo());
    assert_eq!(engine.surface().snapshot(), before);
}

#[test]
fn n_strokes_then_n_undos() {
    let mut engine = highlighted_page();
    let pristine = engine.surface().snapshot();

    let strokes = [((260, 60), (400, 100)), ((300, 120), (580, 55)), ((500, 70), (520, 110))];
    let mut states = vec![pristine.clone()];
    for (from, to) in strokes {
        drag(&mut engine, from, to, 4);
        states.push(engine.surface().snapshot());
    }
    assert_eq!(engine.undo_depth(), strokes.len());

    // Each undo peels off exactly one stroke.
    for expected in states.iter().rev().skip(1) {
        assert!(engine.undo());
        assert_eq!(&engine.surface().snapshot(), expected);
    }
    assert_eq!(engine.surface().snapshot(), pristine);

    // One more is a no-op.
    assert!(!engine.undo());
    assert_eq!(engine.surface().snapshot(), pristine);
}

#[test]
fn undo_during_a_stroke_keeps_earlier_strokes() {
    let mut engine = highlighted_page();
    let pristine = engine.surface().snapshot();

    drag(&mut engine, (260, 60), (400, 60), 4);
    let after_first = engine.surface().snapshot();
    assert_eq!(engine.surface().pixel(330, 60), Some(INK));

    // Second stroke is undone while the button is still held.
    engine.dispatch(PointerEvent::Press(Point::new(300, 100)));
    engine.dispatch(PointerEvent::Move(Point::new(350, 100)));
    assert!(engine.undo());
    assert_eq!(engine.surface().snapshot(), after_first);

    // The rest of that gesture must not ink.
    engine.dispatch(PointerEvent::Move(Point::new(450, 100)));
    engine.dispatch(PointerEvent::Release(Point::new(450, 100)));
    assert_eq!(engine.surface().snapshot(), after_first);
    assert_eq!(engine.undo_depth(), 1);

    assert!(engine.undo());
    assert_eq!(engine.surface().snapshot(), pristine);
}

#[test]
fn oversized_region_strokes_stay_bounded() {
    let huge = Region { x1: -2_000_000_000, y1: 10, x2: i32::MAX, y2: 40 };
    let mut engine = AnnotationEngine::new(FrameBuffer::filled(200, 60, PAGE), vec![huge], &StyleConfig::default());
    engine.highlight_regions();

    // Samples far off either side of the buffer, still inside the region.
    engine.dispatch(PointerEvent::Press(Point::new(-1_900_000_000, 25)));
    engine.dispatch(PointerEvent::Move(Point::new(2_100_000_000, 25)));
    engine.dispatch(PointerEvent::Release(Point::new(2_100_000_000, 25)));

    assert_eq!(engine.surface().pixel(100, 25), Some(INK));
    assert!(engine.undo());
    assert_ne!(engine.surface().pixel(100, 25), Some(INK));
}

#[test]
fn press_outside_then_drag_in_draws_nothing() {
    let mut engine = highlighted_page();
    let before = engine.surface().snapshot();
    drag(&mut engine, (100, 80), (400, 80), 5);
    assert_eq!(engine.undo_depth(), 0);
    assert_eq!(engine.surface().snapshot(), before);
}

#[test]
fn reasserting_highlights_darkens_the_wash() {
    let mut engine = AnnotationEngine::new(
        FrameBuffer::filled(800, 200, PAGE),
        vec![region()],
        &StyleConfig::default(),
    )
    .with_reassert_highlights_on_undo(true);
    engine.highlight_regions();
    let once = engine.surface().pixel(400, 90).unwrap();

    drag(&mut engine, (300, 60), (310, 60), 5);
    engine.undo();
    let twice = engine.surface().pixel(400, 90).unwrap();

    // Fill applied on top of an already highlighted snapshot.
    assert!(twice & 0xFF < once & 0xFF);
}

proptest! {
    #[test]
    fn membership_is_or_of_inclusive_boxes(
        boxes in prop::collection::vec((0i32..500, 0i32..500, 0i32..200, 0i32..200), 0..5),
        x in -10i32..720,
        y in -10i32..720,
    ) {
        let regions: Vec<Region> = boxes
            .iter()
            .map(|&(x1, y1, w, h)| Region { x1, y1, x2: x1 + w, y2: y1 + h })
            .collect();
        let engine = AnnotationEngine::new(FrameBuffer::filled(1, 1, 0), regions.clone(), &StyleConfig::default());

        let expected = regions.iter().any(|r| r.x1 <= x && x <= r.x2 && r.y1 <= y && y <= r.y2);
        prop_assert_eq!(engine.is_within_allowed_region(x, y), expected);
    }

    #[test]
    fn corners_are_inside(x1 in -100i32..100, y1 in -100i32..100, w in 0i32..50, h in 0i32..50) {
        let r = Region { x1, y1, x2: x1 + w, y2: y1 + h };
        let engine = AnnotationEngine::new(FrameBuffer::filled(1, 1, 0), vec![r], &StyleConfig::default());
        for (cx, cy) in [(r.x1, r.y1), (r.x2, r.y1), (r.x1, r.y2), (r.x2, r.y2)] {
            prop_assert!(engine.is_within_allowed_region(cx, cy));
        }
        prop_assert!(!engine.is_within_allowed_region(r.x2 + 1, r.y1));
        prop_assert!(!engine.is_within_allowed_region(r.x1, r.y1 - 1));
    }
}
