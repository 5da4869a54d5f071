//! Page rasterizer: turns one page of a document into pixels.
//!
//! The viewer never parses PDF itself. PDF content goes to PDFium (when
//! built with the `pdfium` feature) and anything else is decoded by the
//! `image` crate as a one-page document.

mod bitmap;
#[cfg(feature = "pdfium")]
mod pdfium;

use std::io::Read;

use crate::error::Error;
use crate::surface::PixelSurface;
use crate::types::FrameBuffer;

pub use bitmap::ImageDocument;
#[cfg(feature = "pdfium")]
pub use pdfium::PdfiumDocument;

/// Upper bound on documents fetched over http(s).
const MAX_DOWNLOAD_BYTES: u64 = 256 * 1024 * 1024;

/// Largest rendered page, per side and in total.
const MAX_RENDER_SIDE: u32 = 16_384;
const MAX_RENDER_PIXELS: u64 = 64 * 1024 * 1024;

/// A page number already checked against the document it came from (1-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRef {
    number: u16,
}

impl PageRef {
    pub fn number(&self) -> u16 {
        self.number
    }

    /// 0-based index for backends that count from zero.
    pub fn index(&self) -> u16 {
        self.number - 1
    }
}

pub trait PageDocument {
    fn page_count(&self) -> u16;

    /// Look up a 1-based page number.
    fn get_page(&self, number: u16) -> Result<PageRef, Error> {
        let count = self.page_count();
        if number == 0 || number > count {
            return Err(Error::OutOfRange { page: number, count });
        }
        Ok(PageRef { number })
    }

    /// Resize `surface` to the page's pixel size at `scale` and paint the page into it.
    /// Returns the (width, height) it was sized to.
    fn render_page(
        &self,
        page: PageRef,
        scale: f32,
        surface: &mut FrameBuffer,
    ) -> Result<(usize, usize), Error>;
}

/// Open a document from a file path or an http(s) URL.
pub fn open_document(locator: &str) -> Result<Box<dyn PageDocument>, Error> {
    let bytes = fetch(locator)?;
    log::info!("Fetched {} ({} bytes)", locator, bytes.len());

    if bytes.starts_with(b"%PDF") {
        open_pdf(bytes)
    } else {
        Ok(Box::new(ImageDocument::from_bytes(&bytes)?))
    }
}

#[cfg(feature = "pdfium")]
fn open_pdf(bytes: Vec<u8>) -> Result<Box<dyn PageDocument>, Error> {
    Ok(Box::new(PdfiumDocument::from_bytes(bytes)?))
}

#[cfg(not(feature = "pdfium"))]
fn open_pdf(_bytes: Vec<u8>) -> Result<Box<dyn PageDocument>, Error> {
    Err(Error::Load("PDF support needs the `pdfium` feature".into()))
}

fn fetch(locator: &str) -> Result<Vec<u8>, Error> {
    if locator.starts_with("http://") || locator.starts_with("https://") {
        let response = ureq::get(locator)
            .call()
            .map_err(|e| Error::Load(format!("{locator}: {e}")))?;
        read_limited(response.into_reader(), MAX_DOWNLOAD_BYTES, locator)
    } else {
        std::fs::read(locator).map_err(|e| Error::Load(format!("{locator}: {e}")))
    }
}

/// Read at most `limit` bytes; a body any longer is an error rather than a truncated document.
fn read_limited(reader: impl Read, limit: u64, locator: &str) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::new();
    reader
        .take(limit.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|e| Error::Load(format!("{locator}: {e}")))?;
    if bytes.len() as u64 > limit {
        return Err(Error::Load(format!("{locator}: document exceeds {limit} bytes")));
    }
    Ok(bytes)
}

/// Page counts past `u16::MAX` are refused at open time instead of wrapping.
#[cfg_attr(not(feature = "pdfium"), allow(dead_code))]
pub(crate) fn checked_page_count<N>(count: N) -> Result<u16, Error>
where
    N: TryInto<u16> + Copy + std::fmt::Display,
{
    count
        .try_into()
        .map_err(|_| Error::Load(format!("document has {count} pages, at most {} are supported", u16::MAX)))
}

/// Refuse render targets too large to allocate as a framebuffer.
pub(crate) fn check_target_size(width: f64, height: f64) -> Result<(u32, u32), Error> {
    if !(width.is_finite() && height.is_finite())
        || width > MAX_RENDER_SIDE as f64
        || height > MAX_RENDER_SIDE as f64
        || width * height > MAX_RENDER_PIXELS as f64
    {
        return Err(Error::Render(format!(
            "rendered page would be {width:.0}x{height:.0}, limit is {MAX_RENDER_SIDE} per side and {MAX_RENDER_PIXELS} pixels"
        )));
    }
    Ok(((width.round() as u32).max(1), (height.round() as u32).max(1)))
}

pub(crate) fn check_scale(scale: f32) -> Result<(), Error> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(Error::Render(format!("scale must be positive, got {scale}")))
    }
}

/// Copy RGBA bytes into the surface as 0x00RRGGBB, compositing onto white.
pub(crate) fn blit_rgba(surface: &mut FrameBuffer, rgba: &[u8], width: usize, height: usize) -> Result<(), Error> {
    if rgba.len() != width * height * 4 {
        return Err(Error::Render(format!(
            "bitmap is {} bytes, expected {} for {width}x{height}",
            rgba.len(),
            width * height * 4
        )));
    }
    surface.resize(width, height);
    for (dst, px) in surface.pixels.iter_mut().zip(rgba.chunks_exact(4)) {
        let a = px[3] as u32;
        // Over white: c*a + 255*(1-a), in 0..255 fixed point.
        let over = |c: u8| (c as u32 * a + 255 * (255 - a) + 127) / 255;
        *dst = (over(px[0]) << 16) | (over(px[1]) << 8) | over(px[2]);
    }
    Ok(())
}
