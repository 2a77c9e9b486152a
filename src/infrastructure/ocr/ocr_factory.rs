use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::OcrExtractor;
use crate::infrastructure::text_processing::MOCK_RESUME_TEXT;
use crate::presentation::config::{OcrProvider, OcrSettings};

use super::mock_ocr_extractor::MockOcrExtractor;
use super::ocr_pdf_adapter::OcrPdfAdapter;
use super::pdf_rasterizer::PdfiumRasterizer;
use super::tesseract_recognizer::TesseractRecognizer;

pub struct OcrExtractorFactory;

impl OcrExtractorFactory {
    pub fn create(settings: &OcrSettings) -> Arc<dyn OcrExtractor> {
        match settings.provider {
            OcrProvider::Tesseract => {
                tracing::info!(
                    executable = %settings.tesseract_path,
                    languages = %settings.languages,
                    dpi = settings.render_dpi,
                    "Using tesseract OCR fallback"
                );
                let rasterizer = PdfiumRasterizer::new(settings.render_dpi, settings.max_pages);
                let recognizer =
                    TesseractRecognizer::new(&settings.tesseract_path, &settings.languages);
                Arc::new(
                    OcrPdfAdapter::new(Arc::new(rasterizer), Arc::new(recognizer))
                        .with_timeout(Duration::from_secs(settings.timeout_secs)),
                )
            }
            OcrProvider::Mock => {
                tracing::info!("Using mock OCR fallback");
                Arc::new(MockOcrExtractor::with_text(MOCK_RESUME_TEXT, 50.0))
            }
            OcrProvider::Disabled => {
                tracing::info!("OCR fallback disabled");
                Arc::new(MockOcrExtractor::empty())
            }
        }
    }
}
