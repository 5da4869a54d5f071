//! Single-page document viewer with freehand ink confined to fixed regions.
//!
//! What you SEE:
//! - The configured page, with each allowed region washed yellow and framed in red.
//! - Hold Left Mouse inside a region to draw; ink never lands outside the regions.
//! - Ctrl+Z (or U) removes the latest stroke. ESC quits.

pub mod app;
pub mod cli;
pub mod config;
pub mod draw;
pub mod engine;
pub mod error;
pub mod gamma;
pub mod input;
pub mod raster;
pub mod surface;
pub mod types;

pub use engine::AnnotationEngine;
pub use error::Error;
pub use input::PointerEvent;
pub use surface::PixelSurface;
pub use types::{FrameBuffer, Point, Region};
