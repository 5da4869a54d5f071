//! Constrained freehand annotation with snapshot undo.
//!
//! The engine owns the surface, the allowed regions and the undo history.
//! Pointer events go in through [`AnnotationEngine::dispatch`]; the engine
//! decides per sample whether ink may land.
//!
//! Stroke states:
//!
//! ```text
//! Idle    --press inside a region-->  Drawing   (snapshot pushed, anchor set)
//! Drawing --move inside a region-->   Drawing   (segment anchor->point, anchor moves)
//! Drawing --move outside-->           Drawing   (nothing drawn, anchor kept)
//! Drawing --release | leave | undo--> Idle     (anchor cleared)
//! ```
//!
//! Everything else is ignored.

use crate::config::StyleConfig;
use crate::input::PointerEvent;
use crate::surface::PixelSurface;
use crate::types::{Fill, FrameBuffer, Point, Region, Snapshot, StrokeStyle};

/// In-progress gesture. `previous_point` is Some exactly while drawing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct StrokeSession {
    drawing: bool,
    previous_point: Option<Point>,
}

pub struct AnnotationEngine<S: PixelSurface = FrameBuffer> {
    surface: S,
    regions: Vec<Region>,
    highlight: Fill,
    border: StrokeStyle,
    ink: StrokeStyle,
    reassert_highlights_on_undo: bool,
    session: StrokeSession,
    undo_stack: Vec<Snapshot>,
}

/// Inclusive-box membership over any region.
fn within_any(regions: &[Region], x: i32, y: i32) -> bool {
    regions.iter().any(|r| r.contains(x, y))
}

impl<S: PixelSurface> AnnotationEngine<S> {
    /// Take ownership of a surface that already holds the base page image.
    /// Highlights are not painted yet; call [`highlight_regions`](Self::highlight_regions) once.
    pub fn new(surface: S, regions: Vec<Region>, style: &StyleConfig) -> Self {
        Self {
            surface,
            regions,
            highlight: style.highlight(),
            border: style.border(),
            ink: style.stroke(),
            reassert_highlights_on_undo: false,
            session: StrokeSession::default(),
            undo_stack: Vec::new(),
        }
    }

    /// Also repaint highlights over every restored snapshot.
    pub fn with_reassert_highlights_on_undo(mut self, enabled: bool) -> Self {
        self.reassert_highlights_on_undo = enabled;
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn is_drawing(&self) -> bool {
        self.session.drawing
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_within_allowed_region(&self, x: i32, y: i32) -> bool {
        within_any(&self.regions, x, y)
    }

    /// Paint every region's translucent fill and border over the current pixels.
    ///
    /// Does not clear first: call it once per fresh base image, or the fills stack up.
    pub fn highlight_regions(&mut self) {
        for region in &self.regions {
            self.surface.fill_rect(*region, self.highlight);
            self.surface.stroke_rect(*region, self.border);
        }
    }

    /// Push a copy of the whole surface onto the undo stack.
    pub fn save_state(&mut self) {
        self.undo_stack.push(self.surface.snapshot());
    }

    /// Restore the surface to how it was before the latest stroke.
    /// Returns false (and changes nothing) when there is nothing to undo.
    ///
    /// A stroke still in progress ends here; the rest of that gesture draws nothing.
    pub fn undo(&mut self) -> bool {
        self.stop_drawing();
        let Some(snapshot) = self.undo_stack.pop() else {
            log::debug!("undo: history empty");
            return false;
        };
        self.surface.restore(snapshot);
        if self.reassert_highlights_on_undo {
            self.highlight_regions();
        }
        log::debug!("undo: {} snapshot(s) left", self.undo_stack.len());
        true
    }

    /// Feed one pointer event through the stroke state machine.
    pub fn dispatch(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Press(p) => self.start_drawing(p),
            PointerEvent::Move(p) => self.draw(p),
            PointerEvent::Release(_) | PointerEvent::Leave(_) => self.stop_drawing(),
        }
    }

    fn start_drawing(&mut self, p: Point) {
        if self.session.drawing || !self.is_within_allowed_region(p.x, p.y) {
            log::trace!("press at ({}, {}) ignored", p.x, p.y);
            return;
        }
        // Snapshot first: nothing of this stroke may be in it.
        self.save_state();
        self.session = StrokeSession { drawing: true, previous_point: Some(p) };
        log::debug!("stroke started at ({}, {}), undo depth {}", p.x, p.y, self.undo_stack.len());
    }

    fn draw(&mut self, p: Point) {
        if !self.session.drawing {
            return;
        }
        if !self.is_within_allowed_region(p.x, p.y) {
            // Keep the anchor: the next in-region sample joins from the last good point.
            log::trace!("move to ({}, {}) outside regions", p.x, p.y);
            return;
        }
        if let Some(prev) = self.session.previous_point {
            let regions = &self.regions;
            // Control point = start point, so the curve is the straight segment.
            self.surface
                .stroke_quad(prev, prev, p, self.ink, &|x, y| within_any(regions, x, y));
            self.session.previous_point = Some(p);
        }
    }

    fn stop_drawing(&mut self) {
        if self.session.drawing {
            log::debug!("stroke finished");
        }
        self.session = StrokeSession::default();
    }
}
