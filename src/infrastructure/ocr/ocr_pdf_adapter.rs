use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{OcrError, OcrExtractor, OcrText};

use super::{PageRasterizer, TextRecognizer};

pub const OCR_TIMEOUT: Duration = Duration::from_secs(300);

/// OCR fallback: rasterizes every page, recognizes each image, and joins
/// non-empty page texts with a blank line.
pub struct OcrPdfAdapter {
    rasterizer: Arc<dyn PageRasterizer>,
    recognizer: Arc<dyn TextRecognizer>,
    timeout: Duration,
}

impl OcrPdfAdapter {
    pub fn new(rasterizer: Arc<dyn PageRasterizer>, recognizer: Arc<dyn TextRecognizer>) -> Self {
        Self {
            rasterizer,
            recognizer,
            timeout: OCR_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn rasterize(&self, data: &[u8]) -> Result<Vec<Vec<u8>>, OcrError> {
        let rasterizer = Arc::clone(&self.rasterizer);
        let data_owned = data.to_vec();

        tokio::task::spawn_blocking(move || {
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                rasterizer.rasterize(&data_owned)
            }))
            .unwrap_or_else(|_| {
                Err(OcrError::OcrFailed(
                    "OOM or panic during PDF rasterization".to_string(),
                ))
            })
        })
        .await
        .map_err(|e| OcrError::OcrFailed(format!("task join error: {e}")))?
    }

    async fn recognize_all(&self, data: &[u8]) -> Result<OcrText, OcrError> {
        let png_buffers = self.rasterize(data).await?;

        if png_buffers.is_empty() {
            return Err(OcrError::EmptyContent("PDF has no pages".to_string()));
        }

        tracing::info!(
            page_count = png_buffers.len(),
            "PDF rasterization complete, starting OCR"
        );

        let mut page_texts: Vec<String> = Vec::with_capacity(png_buffers.len());
        let mut total_confidence = 0.0_f32;

        for (index, png_bytes) in png_buffers.iter().enumerate() {
            let page = self.recognizer.recognize(png_bytes).await?;
            tracing::debug!(
                page = index + 1,
                confidence = page.confidence,
                chars = page.text.chars().count(),
                "Page recognized"
            );
            if !page.text.trim().is_empty() {
                total_confidence += page.confidence;
                page_texts.push(page.text.trim().to_string());
            }
        }

        let text = page_texts.join("\n\n");
        if text.is_empty() {
            return Err(OcrError::EmptyContent(
                "no text could be recognized in the PDF pages".to_string(),
            ));
        }

        Ok(OcrText {
            text,
            confidence: total_confidence / page_texts.len() as f32,
        })
    }
}

#[async_trait]
impl OcrExtractor for OcrPdfAdapter {
    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    async fn extract(&self, data: &[u8]) -> Result<OcrText, OcrError> {
        tokio::time::timeout(self.timeout, self.recognize_all(data))
            .await
            .map_err(|_| OcrError::OcrFailed("OCR timed out".to_string()))?
    }
}
