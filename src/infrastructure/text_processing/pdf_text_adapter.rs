use std::io::Write;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{ExtractedText, ExtractionError, TextExtractor};

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);
const PDF_HEADER_SEARCH_WINDOW: usize = 1024;

/// Text-layer extraction through `pdf_oxide`.
pub struct PdfTextAdapter {
    timeout: Duration,
}

impl Default for PdfTextAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfTextAdapter {
    pub fn new() -> Self {
        Self {
            timeout: EXTRACTION_TIMEOUT,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn extract_pages(path: &Path) -> Result<Vec<String>, ExtractionError> {
        let mut doc = PdfDocument::open(path)
            .map_err(|e| ExtractionError::InvalidPdf(format!("failed to parse PDF: {e}")))?;

        let page_count = doc
            .page_count()
            .map_err(|e| ExtractionError::InvalidPdf(format!("failed to read page count: {e}")))?;

        (0..page_count)
            .map(|page_index| {
                doc.extract_text(page_index).map_err(|e| {
                    ExtractionError::ExtractionFailed(format!(
                        "page {} text extraction failed: {e}",
                        page_index + 1
                    ))
                })
            })
            .collect()
    }
}

/// Joins each page's whitespace-separated items with single spaces, then
/// pages with a blank line; whitespace-only pages are skipped.
pub fn join_page_texts<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    pages
        .into_iter()
        .map(|page| page.as_ref().split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|page| !page.is_empty())
        .fold(String::new(), |mut acc, page| {
            if !acc.is_empty() {
                acc.push_str("\n\n");
            }
            acc.push_str(&page);
            acc
        })
        .trim()
        .to_string()
}

fn has_pdf_header(data: &[u8]) -> bool {
    let window = &data[..data.len().min(PDF_HEADER_SEARCH_WINDOW)];
    window.windows(5).any(|w| w == b"%PDF-")
}

#[async_trait]
impl TextExtractor for PdfTextAdapter {
    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    async fn extract(&self, data: &[u8]) -> Result<ExtractedText, ExtractionError> {
        if !has_pdf_header(data) {
            return Err(ExtractionError::InvalidPdf(
                "missing %PDF- header".to_string(),
            ));
        }

        let mut temp_file = tempfile::NamedTempFile::new().map_err(|e| {
            ExtractionError::ExtractionFailed(format!("failed to create temp file: {e}"))
        })?;

        temp_file.write_all(data).map_err(|e| {
            ExtractionError::ExtractionFailed(format!("failed to write temp file: {e}"))
        })?;

        let temp_path = temp_file.path().to_path_buf();

        let pages = tokio::time::timeout(
            self.timeout,
            tokio::task::spawn_blocking(move || Self::extract_pages(&temp_path)),
        )
        .await
        .map_err(|_| ExtractionError::ExtractionFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| ExtractionError::ExtractionFailed(format!("task join error: {e}")))??;

        let page_count = pages.len();
        tracing::info!(page_count, "PDF text extraction complete");

        if page_count == 0 {
            return Err(ExtractionError::EmptyContent(
                "PDF has no pages".to_string(),
            ));
        }

        let text = join_page_texts(&pages);
        if text.is_empty() {
            return Err(ExtractionError::EmptyContent(
                "PDF has no text layer; it may be image-based".to_string(),
            ));
        }

        Ok(ExtractedText { text, page_count })
    }
}
