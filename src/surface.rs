//! The pixel surface the annotation engine paints on.
//!
//! `FrameBuffer` is the real implementation; the trait exists so the engine
//! can be driven against any raster target (tests use a recording double).

use crate::draw;
use crate::gamma::GammaLut;
use crate::types::{Fill, FrameBuffer, Point, Region, Snapshot, StrokeStyle};

pub trait PixelSurface {
    /// (width, height) in pixels.
    fn size(&self) -> (usize, usize);

    /// Resize to (width, height). Contents after a resize are unspecified.
    fn resize(&mut self, width: usize, height: usize);

    /// Blend a translucent fill over the rectangle.
    fn fill_rect(&mut self, rect: Region, fill: Fill);

    /// Draw the rectangle's outline.
    fn stroke_rect(&mut self, rect: Region, style: StrokeStyle);

    /// Draw a quadratic curve segment; pixels where `clip` is false are left alone.
    fn stroke_quad(
        &mut self,
        from: Point,
        ctrl: Point,
        to: Point,
        style: StrokeStyle,
        clip: &dyn Fn(i32, i32) -> bool,
    );

    /// Copy out every pixel.
    fn snapshot(&self) -> Snapshot;

    /// Overwrite every pixel from an earlier snapshot.
    fn restore(&mut self, snapshot: Snapshot);
}

impl PixelSurface for FrameBuffer {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, 0);
    }

    fn fill_rect(&mut self, rect: Region, fill: Fill) {
        draw::fill_rect(self, rect, fill, GammaLut::shared());
    }

    fn stroke_rect(&mut self, rect: Region, style: StrokeStyle) {
        draw::stroke_rect(self, rect, style);
    }

    fn stroke_quad(
        &mut self,
        from: Point,
        ctrl: Point,
        to: Point,
        style: StrokeStyle,
        clip: &dyn Fn(i32, i32) -> bool,
    ) {
        draw::draw_quad(self, from, ctrl, to, style, clip);
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        if (snapshot.width, snapshot.height) != (self.width, self.height) {
            log::warn!(
                "restoring {}x{} snapshot onto {}x{} surface; adopting snapshot size",
                snapshot.width,
                snapshot.height,
                self.width,
                self.height
            );
        }
        self.width = snapshot.width;
        self.height = snapshot.height;
        self.pixels = snapshot.pixels;
    }
}
