mod mock_ocr_extractor;
mod ocr_factory;
mod ocr_pdf_adapter;
mod pdf_rasterizer;
mod tesseract_recognizer;

use async_trait::async_trait;

use crate::application::ports::OcrError;

pub use mock_ocr_extractor::MockOcrExtractor;
pub use ocr_factory::OcrExtractorFactory;
pub use ocr_pdf_adapter::{OCR_TIMEOUT, OcrPdfAdapter};
pub use pdf_rasterizer::{DEFAULT_MAX_PAGES, DEFAULT_RENDER_DPI, PdfiumRasterizer};
pub use tesseract_recognizer::{DEFAULT_LANGUAGES, TesseractRecognizer, parse_tsv};

/// Renders PDF pages to PNG images. Called from a blocking thread.
pub trait PageRasterizer: Send + Sync {
    fn rasterize(&self, data: &[u8]) -> Result<Vec<Vec<u8>>, OcrError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedPage {
    pub text: String,
    pub confidence: f32,
}

#[async_trait]
pub trait TextRecognizer: Send + Sync {
    async fn recognize(&self, png: &[u8]) -> Result<RecognizedPage, OcrError>;
}
