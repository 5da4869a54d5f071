// Window + software drawing utilities.
// Provided here:
// 1) A window that shows the rendered page with its annotations.
// 2) Rectangle fills/borders for the region highlight.
// 3) Thick, clipped line and quadratic-curve strokes for freehand ink.

use crate::error::Error;
use crate::gamma::GammaLut;
use crate::types::{Fill, FrameBuffer, Point, Region, StrokeStyle};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window sized to the rendered page.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we'll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Mouse position in window pixels, or None while the pointer is outside the window.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// Ctrl+Z (Cmd+Z on macOS) or a bare U, edge-triggered.
    pub fn undo_pressed_once(&self) -> bool {
        let modifier = self.window.is_key_down(Key::LeftCtrl)
            || self.window.is_key_down(Key::RightCtrl)
            || self.window.is_key_down(Key::LeftSuper)
            || self.window.is_key_down(Key::RightSuper);
        (modifier && self.window.is_key_pressed(Key::Z, KeyRepeat::No))
            || self.window.is_key_pressed(Key::U, KeyRepeat::No)
    }

    pub fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }
}

/* ---------- Software drawing: pixels, rectangles, strokes ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Offsets a pen of `width` pixels covers around its center: -(w/2) ..= -(w/2)+w-1.
#[inline]
fn pen_span(width: u32) -> (i32, i32) {
    let w = width.max(1) as i32;
    let lo = -(w / 2);
    (lo, lo + w - 1)
}

/// Blend `fill` over every pixel of the rectangle (right/bottom edges exclusive,
/// like a canvas fillRect of width x2-x1 and height y2-y1).
pub fn fill_rect(fb: &mut FrameBuffer, rect: Region, fill: Fill, lut: &GammaLut) {
    let x0 = rect.x1.max(0) as usize;
    let y0 = rect.y1.max(0) as usize;
    let x1 = (rect.x2.max(0) as usize).min(fb.width);
    let y1 = (rect.y2.max(0) as usize).min(fb.height);
    for y in y0..y1 {
        let row = y * fb.width;
        for px in &mut fb.pixels[row + x0.min(x1)..row + x1] {
            *px = lut.blend(*px, fill.color, fill.alpha);
        }
    }
}

/// Stroke the rectangle outline with a pen centered on each edge.
/// Only the part that lands on the buffer is walked, so huge regions cost no more than the buffer.
pub fn stroke_rect(fb: &mut FrameBuffer, rect: Region, style: StrokeStyle) {
    let (lo, hi) = pen_span(style.width);
    let max_x = i32::try_from(fb.width).unwrap_or(i32::MAX) - 1;
    let max_y = i32::try_from(fb.height).unwrap_or(i32::MAX) - 1;
    let (x_from, x_to) = (rect.x1.saturating_add(lo).max(0), rect.x2.saturating_add(hi).min(max_x));
    let (y_from, y_to) = (rect.y1.saturating_add(lo).max(0), rect.y2.saturating_add(hi).min(max_y));
    for o in lo..=hi {
        // Top and bottom edges
        let (top, bottom) = (rect.y1.saturating_add(o), rect.y2.saturating_add(o));
        for x in x_from..=x_to {
            put_pixel(fb, x, top, style.color);
            put_pixel(fb, x, bottom, style.color);
        }
        // Left and right edges
        let (left, right) = (rect.x1.saturating_add(o), rect.x2.saturating_add(o));
        for y in y_from..=y_to {
            put_pixel(fb, left, y, style.color);
            put_pixel(fb, right, y, style.color);
        }
    }
}

/// Stamp a square pen at (x,y); pixels rejected by `clip` stay untouched.
fn stamp(fb: &mut FrameBuffer, x: i32, y: i32, style: StrokeStyle, clip: &dyn Fn(i32, i32) -> bool) {
    let (lo, hi) = pen_span(style.width);
    for dy in lo..=hi {
        for dx in lo..=hi {
            let (px, py) = (x + dx, y + dy);
            if clip(px, py) {
                put_pixel(fb, px, py, style.color);
            }
        }
    }
}

/// Clip a segment to the buffer grown by `margin` on every side (Liang-Barsky).
/// Returns None when no pen stamp along it could touch the buffer.
fn clip_segment(fb: &FrameBuffer, from: Point, to: Point, margin: i32) -> Option<(Point, Point)> {
    let m = margin as f64;
    let (x_max, y_max) = (fb.width as f64 - 1.0 + m, fb.height as f64 - 1.0 + m);
    let (x0, y0) = (from.x as f64, from.y as f64);
    let (dx, dy) = (to.x as f64 - x0, to.y as f64 - y0);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [(-dx, x0 + m), (dx, x_max - x0), (-dy, y0 + m), (dy, y_max - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else if p < 0.0 {
            t0 = t0.max(q / p);
        } else {
            t1 = t1.min(q / p);
        }
    }
    if t0 > t1 {
        return None;
    }
    let at = |t: f64| Point::new((x0 + t * dx).round() as i32, (y0 + t * dy).round() as i32);
    let start = if t0 == 0.0 { from } else { at(t0) };
    let end = if t1 == 1.0 { to } else { at(t1) };
    Some((start, end))
}

/// Draw a thick line between `from` and `to` using Bresenham, stamping the pen at each step.
/// The walk starts and ends at the buffer edge, whatever the endpoints are.
pub fn draw_line(
    fb: &mut FrameBuffer,
    from: Point,
    to: Point,
    style: StrokeStyle,
    clip: &dyn Fn(i32, i32) -> bool,
) {
    let (lo, hi) = pen_span(style.width);
    let Some((from, to)) = clip_segment(fb, from, to, (-lo).max(hi) + 1) else {
        return;
    };
    let (mut x0, mut y0, x1, y1) = (from.x, from.y, to.x, to.y);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        stamp(fb, x0, y0, style, clip);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Point on the quadratic Bezier p0 -> ctrl -> p1 at parameter t.
fn quad_at(p0: Point, ctrl: Point, p1: Point, t: f32) -> Point {
    let u = 1.0 - t;
    let x = u * u * p0.x as f32 + 2.0 * u * t * ctrl.x as f32 + t * t * p1.x as f32;
    let y = u * u * p0.y as f32 + 2.0 * u * t * ctrl.y as f32 + t * t * p1.y as f32;
    Point::new(x.round() as i32, y.round() as i32)
}

/// Flattening cap; longer curves get longer pieces. Each piece is clipped to the buffer anyway.
const MAX_QUAD_PIECES: usize = 4096;

/// Draw a quadratic curve by flattening it into short straight pieces.
/// With `ctrl == from` the curve degenerates to the straight segment from -> to.
pub fn draw_quad(
    fb: &mut FrameBuffer,
    from: Point,
    ctrl: Point,
    to: Point,
    style: StrokeStyle,
    clip: &dyn Fn(i32, i32) -> bool,
) {
    // The control polygon bounds the curve length; ~2px per piece is smooth enough.
    let hull = |a: Point, b: Point| (b.x as f32 - a.x as f32).hypot(b.y as f32 - a.y as f32);
    let approx_len = hull(from, ctrl) + hull(ctrl, to);
    let pieces = ((approx_len / 2.0).ceil() as usize).clamp(1, MAX_QUAD_PIECES);

    let mut prev = from;
    for i in 1..=pieces {
        let next = if i == pieces { to } else { quad_at(from, ctrl, to, i as f32 / pieces as f32) };
        draw_line(fb, prev, next, style, clip);
        prev = next;
    }
}
