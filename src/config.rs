//! Viewer configuration: which document to show and where ink is allowed.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! gives the stock single-region setup.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::{Fill, Region, StrokeStyle};

/// A `#RRGGBB` color, stored as 0x00RRGGBB.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(pub u32);

impl TryFrom<String> for HexColor {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let digits = s.strip_prefix('#').unwrap_or(&s);
        if digits.len() != 6 {
            return Err(Error::Config(format!("color {s:?}: expected #RRGGBB")));
        }
        u32::from_str_radix(digits, 16)
            .map(HexColor)
            .map_err(|e| Error::Config(format!("color {s:?}: {e}")))
    }
}

impl From<HexColor> for String {
    fn from(c: HexColor) -> Self {
        format!("#{:06X}", c.0)
    }
}

impl fmt::Debug for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub highlight_fill: HexColor,
    pub highlight_alpha: f32,
    pub border_color: HexColor,
    pub border_width: u32,
    pub stroke_color: HexColor,
    pub stroke_width: u32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        // Light yellow wash with a red frame; ink inherits the frame's pen.
        Self {
            highlight_fill: HexColor(0x00_FF_FF_00),
            highlight_alpha: 0.3,
            border_color: HexColor(0x00_FF_00_00),
            border_width: 2,
            stroke_color: HexColor(0x00_FF_00_00),
            stroke_width: 2,
        }
    }
}

impl StyleConfig {
    pub fn highlight(&self) -> Fill {
        Fill { color: self.highlight_fill.0, alpha: self.highlight_alpha }
    }

    pub fn border(&self) -> StrokeStyle {
        StrokeStyle { color: self.border_color.0, width: self.border_width }
    }

    pub fn stroke(&self) -> StrokeStyle {
        StrokeStyle { color: self.stroke_color.0, width: self.stroke_width }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// File path or http(s) URL of the document.
    #[serde(alias = "documentUrl")]
    pub document: String,
    /// 1-based page to show.
    pub page: u16,
    /// Render scale (1.0 = 72 dpi for PDFs, native size for images).
    pub scale: f32,
    pub regions: Vec<Region>,
    pub style: StyleConfig,
    /// Re-run the highlight pass after every undo, on top of the restored snapshot.
    pub reassert_highlights_on_undo: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            document: "assets/pdf/test.pdf".to_string(),
            page: 1,
            scale: 1.5,
            regions: vec![Region { x1: 250, y1: 50, x2: 600, y2: 125 }],
            style: StyleConfig::default(),
            reassert_highlights_on_undo: false,
        }
    }
}

impl ViewerConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, Error> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.document.trim().is_empty() {
            return Err(Error::Config("document must not be empty".into()));
        }
        if self.page == 0 {
            return Err(Error::Config("page numbers start at 1".into()));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(Error::Config(format!("scale must be positive, got {}", self.scale)));
        }
        for region in &self.regions {
            region.validate()?;
        }
        let style = &self.style;
        if !(0.0..=1.0).contains(&style.highlight_alpha) {
            return Err(Error::Config(format!(
                "highlight_alpha must be within [0, 1], got {}",
                style.highlight_alpha
            )));
        }
        if style.border_width == 0 || style.stroke_width == 0 {
            return Err(Error::Config("line widths must be at least 1".into()));
        }
        Ok(())
    }
}
