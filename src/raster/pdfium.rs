//! PDF pages rendered by PDFium.
//!
//! PDFium is a shared library bound at runtime, so a missing library shows up
//! as a load error when the first PDF is opened, not at build time.

use pdfium_render::prelude::*;

use super::{blit_rgba, check_scale, check_target_size, checked_page_count, PageDocument, PageRef};
use crate::error::Error;
use crate::types::FrameBuffer;

pub struct PdfiumDocument {
    document: pdfium_render::prelude::PdfDocument<'static>,
    page_count: u16,
}

impl PdfiumDocument {
    /// Bind to the PDFium library.
    ///
    /// Search order:
    /// 1. Executable's directory
    /// 2. Current working directory
    /// 3. System library paths
    fn bind() -> Result<Pdfium, Error> {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()));

        if let Some(ref dir) = exe_dir {
            if let Ok(bindings) =
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir))
            {
                return Ok(Pdfium::new(bindings));
            }
        }

        Ok(Pdfium::new(
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                .or_else(|_| Pdfium::bind_to_system_library())
                .map_err(|e| Error::Load(format!("Bind PDFium: {e}")))?,
        ))
    }

    /// Parse a PDF held in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Error> {
        // One document per session; the bindings live as long as the process.
        let pdfium: &'static Pdfium = Box::leak(Box::new(Self::bind()?));

        let document = pdfium
            .load_pdf_from_byte_vec(bytes, None)
            .map_err(|e| Error::Load(format!("Parse PDF: {e}")))?;
        let page_count = checked_page_count(document.pages().len())?;
        log::debug!("PDF has {page_count} pages");

        Ok(Self { document, page_count })
    }
}

impl PageDocument for PdfiumDocument {
    fn page_count(&self) -> u16 {
        self.page_count
    }

    fn render_page(
        &self,
        page: PageRef,
        scale: f32,
        surface: &mut FrameBuffer,
    ) -> Result<(usize, usize), Error> {
        check_scale(scale)?;
        let pdf_page = self
            .document
            .pages()
            .get(page.index() as _)
            .map_err(|e| Error::Render(format!("Page {}: {e}", page.number())))?;

        check_target_size(
            pdf_page.width().value as f64 * scale as f64,
            pdf_page.height().value as f64 * scale as f64,
        )?;
        let config = PdfRenderConfig::new().scale_page_by_factor(scale);
        let bitmap = pdf_page
            .render_with_config(&config)
            .map_err(|e| Error::Render(format!("Page {}: {e}", page.number())))?;

        let (w, h) = (bitmap.width() as usize, bitmap.height() as usize);
        blit_rgba(surface, &bitmap.as_rgba_bytes(), w, h)?;
        Ok((w, h))
    }
}
