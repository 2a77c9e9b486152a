use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq)]
pub struct OcrText {
    pub text: String,
    /// Mean recognizer confidence in `0.0..=100.0`. Advisory only.
    pub confidence: f32,
}

/// Recognizes text from the rendered pages of a PDF without a usable text layer.
#[async_trait]
pub trait OcrExtractor: Send + Sync {
    async fn extract(&self, data: &[u8]) -> Result<OcrText, OcrError>;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OcrError {
    #[error("invalid image data: {0}")]
    InvalidImage(String),
    #[error("OCR failed: {0}")]
    OcrFailed(String),
    #[error("OCR found no text: {0}")]
    EmptyContent(String),
}

impl OcrError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidImage(_) => "INVALID_IMAGE",
            Self::OcrFailed(_) => "OCR_FAILED",
            Self::EmptyContent(_) => "EMPTY_CONTENT",
        }
    }
}
