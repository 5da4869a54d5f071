// Core types shared by the rasterizer, the surface and the annotation engine.

use crate::error::Error;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the page is on screen (pixels)
    pub height: usize,     // how tall the page is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A buffer of the given size filled with `color`.
    pub fn filled(width: usize, height: usize, color: u32) -> Self {
        Self { width, height, pixels: vec![color; width * height] }
    }

    /// Pixel at (x,y), or None outside the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }
}

/// A pointer position in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle where drawing is allowed, in surface pixels.
/// Bounds are inclusive on all four edges; `x1 <= x2` and `y1 <= y2` always hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Region {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Result<Self, Error> {
        let region = Self { x1, y1, x2, y2 };
        region.validate()?;
        Ok(region)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.x1 > self.x2 || self.y1 > self.y2 {
            return Err(Error::Config(format!(
                "region ({}, {}, {}, {}) must satisfy x1 <= x2 and y1 <= y2",
                self.x1, self.y1, self.x2, self.y2
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }
}

// "X1,Y1,X2,Y2" as typed on the command line.
impl std::str::FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<i32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| Error::Config(format!("region {s:?}: {e}")))?;
        match parts.as_slice() {
            &[x1, y1, x2, y2] => Region::new(x1, y1, x2, y2),
            _ => Err(Error::Config(format!("region {s:?}: expected X1,Y1,X2,Y2"))),
        }
    }
}

/// Full copy of a surface at one instant. Restoring it undoes every pixel change since.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

/// Line color + width for strokes and borders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrokeStyle {
    pub color: u32, // 0x00RRGGBB
    pub width: u32, // pixels, >= 1
}

/// Translucent fill used for region highlights.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fill {
    pub color: u32,  // 0x00RRGGBB
    pub alpha: f32,  // 0 = invisible, 1 = opaque
}
