use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedText {
    pub text: String,
    pub page_count: usize,
}

/// Reads the embedded text layer of a PDF.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, data: &[u8]) -> Result<ExtractedText, ExtractionError>;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtractionError {
    #[error("invalid PDF file: {0}")]
    InvalidPdf(String),
    #[error("PDF text extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("no text layer found: {0}")]
    EmptyContent(String),
}

impl ExtractionError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidPdf(_) => "INVALID_PDF",
            Self::ExtractionFailed(_) => "EXTRACTION_FAILED",
            Self::EmptyContent(_) => "EMPTY_CONTENT",
        }
    }
}
