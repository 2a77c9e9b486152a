use image::ImageFormat;
use pdfium_render::prelude::*;

use crate::application::ports::OcrError;

use super::PageRasterizer;

pub const DEFAULT_RENDER_DPI: f32 = 150.0;
pub const DEFAULT_MAX_PAGES: usize = 20;

pub struct PdfiumRasterizer {
    dpi: f32,
    max_pages: usize,
}

impl Default for PdfiumRasterizer {
    fn default() -> Self {
        Self::new(DEFAULT_RENDER_DPI, DEFAULT_MAX_PAGES)
    }
}

impl PdfiumRasterizer {
    pub fn new(dpi: f32, max_pages: usize) -> Self {
        Self { dpi, max_pages }
    }
}

impl PageRasterizer for PdfiumRasterizer {
    fn rasterize(&self, data: &[u8]) -> Result<Vec<Vec<u8>>, OcrError> {
        let pdfium = Pdfium::new(
            Pdfium::bind_to_system_library()
                .map_err(|e| OcrError::OcrFailed(format!("pdfium bind failed: {e}")))?,
        );

        let doc = pdfium
            .load_pdf_from_byte_slice(data, None)
            .map_err(|e| OcrError::OcrFailed(format!("pdfium open failed: {e}")))?;

        let page_count = doc.pages().len() as usize;
        let pages_to_render = page_count.min(self.max_pages);
        if pages_to_render < page_count {
            tracing::warn!(page_count, pages_to_render, "Truncating OCR to page limit");
        }

        let mut png_buffers: Vec<Vec<u8>> = Vec::with_capacity(pages_to_render);

        for index in 0..pages_to_render {
            let page = doc.pages().get(index as u16).map_err(|e| {
                OcrError::OcrFailed(format!("page {index} access failed: {e}"))
            })?;

            let width = (page.width().value * self.dpi / 72.0) as i32;
            let height = (page.height().value * self.dpi / 72.0) as i32;

            let bitmap = page
                .render_with_config(
                    &PdfRenderConfig::new()
                        .set_target_width(width)
                        .set_target_height(height),
                )
                .map_err(|e| OcrError::OcrFailed(format!("render page {index} failed: {e}")))?;

            let mut png_bytes: Vec<u8> = Vec::new();
            bitmap
                .as_image()
                .write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
                .map_err(|e| {
                    OcrError::InvalidImage(format!("PNG encode page {index} failed: {e}"))
                })?;

            png_buffers.push(png_bytes);
        }

        Ok(png_buffers)
    }
}
