use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::application::ports::{OcrError, OcrExtractor, OcrText};

/// Canned OCR outcome. `empty()` doubles as the "OCR disabled" backend.
pub struct MockOcrExtractor {
    outcome: Result<OcrText, OcrError>,
    calls: AtomicUsize,
}

impl MockOcrExtractor {
    pub fn with_text(text: impl Into<String>, confidence: f32) -> Self {
        Self::with_outcome(Ok(OcrText {
            text: text.into(),
            confidence,
        }))
    }

    pub fn empty() -> Self {
        Self::with_outcome(Err(OcrError::EmptyContent(
            "OCR is disabled".to_string(),
        )))
    }

    pub fn with_outcome(outcome: Result<OcrText, OcrError>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OcrExtractor for MockOcrExtractor {
    async fn extract(&self, _data: &[u8]) -> Result<OcrText, OcrError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}
