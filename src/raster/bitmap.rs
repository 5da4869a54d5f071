// Raster images (PNG, JPEG, ...) shown as a one-page document.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use super::{blit_rgba, check_scale, check_target_size, PageDocument, PageRef};
use crate::error::Error;
use crate::types::FrameBuffer;

pub struct ImageDocument {
    image: RgbaImage,
}

impl ImageDocument {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| Error::Load(format!("Decode image: {e}")))?
            .to_rgba8();
        log::debug!("Decoded {}x{} image document", image.width(), image.height());
        Ok(Self { image })
    }
}

impl PageDocument for ImageDocument {
    fn page_count(&self) -> u16 {
        1
    }

    fn render_page(
        &self,
        _page: PageRef,
        scale: f32,
        surface: &mut FrameBuffer,
    ) -> Result<(usize, usize), Error> {
        check_scale(scale)?;
        let (w, h) = self.image.dimensions();
        let (tw, th) = check_target_size(w as f64 * scale as f64, h as f64 * scale as f64)?;

        if (tw, th) == (w, h) {
            blit_rgba(surface, self.image.as_raw(), w as usize, h as usize)?;
        } else {
            let scaled = imageops::resize(&self.image, tw, th, FilterType::Triangle);
            blit_rgba(surface, scaled.as_raw(), tw as usize, th as usize)?;
        }
        Ok((tw as usize, th as usize))
    }
}
