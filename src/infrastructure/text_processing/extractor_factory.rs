use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::TextExtractor;
use crate::presentation::config::{ExtractionSettings, TextExtractorProvider};

use super::mock_text_extractor::MockTextExtractor;
use super::pdf_text_adapter::PdfTextAdapter;

pub struct TextExtractorFactory;

impl TextExtractorFactory {
    pub fn create(settings: &ExtractionSettings) -> Arc<dyn TextExtractor> {
        match settings.provider {
            TextExtractorProvider::Pdf => {
                tracing::info!(
                    timeout_secs = settings.timeout_secs,
                    "Using pdf_oxide text extractor"
                );
                Arc::new(PdfTextAdapter::with_timeout(Duration::from_secs(
                    settings.timeout_secs,
                )))
            }
            TextExtractorProvider::Mock => {
                tracing::info!("Using mock text extractor");
                Arc::new(MockTextExtractor::default())
            }
        }
    }
}
