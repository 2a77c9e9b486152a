use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::presentation::config::{LlmProvider, LlmSettings};

use super::gemini_client::{DEFAULT_GEMINI_BASE_URL, GeminiClient};
use super::mock_llm_client::MockLlmClient;
use super::openai_client::{DEFAULT_OPENAI_BASE_URL, OpenAiClient};

pub struct LlmClientFactory;

impl LlmClientFactory {
    pub fn create(settings: &LlmSettings) -> Result<Arc<dyn LlmClient>, LlmClientError> {
        let timeout = Duration::from_secs(settings.timeout_secs);
        match settings.provider {
            LlmProvider::Gemini => {
                let base_url = settings
                    .base_url
                    .as_deref()
                    .unwrap_or(DEFAULT_GEMINI_BASE_URL);
                if settings.api_key.trim().is_empty() {
                    tracing::warn!("Gemini selected without an API key, analysis calls will fail");
                }
                tracing::info!(model = %settings.model, "Using Gemini analysis backend");
                Ok(Arc::new(GeminiClient::new(
                    base_url,
                    settings.api_key.clone(),
                    settings.model.clone(),
                    timeout,
                )?))
            }
            LlmProvider::OpenAi => {
                let base_url = settings
                    .base_url
                    .as_deref()
                    .unwrap_or(DEFAULT_OPENAI_BASE_URL);
                tracing::info!(model = %settings.model, base_url, "Using OpenAI-compatible analysis backend");
                Ok(Arc::new(OpenAiClient::new(
                    base_url,
                    settings.api_key.clone(),
                    settings.model.clone(),
                    timeout,
                )?))
            }
            LlmProvider::Mock => {
                tracing::info!(
                    delay_ms = settings.mock_delay_ms,
                    "Using mock analysis backend"
                );
                Ok(Arc::new(MockLlmClient::with_delay(Duration::from_millis(
                    settings.mock_delay_ms,
                ))))
            }
        }
    }
}
