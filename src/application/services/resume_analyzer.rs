use std::sync::Arc;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::AiAnalysis;

use super::analysis_parser::{normalize_analysis, parse_analysis_response};

pub const RESUME_ANALYSIS_PROMPT: &str = "You are an assistant that analyzes résumés and CVs.\n\
The text below was extracted from a résumé or a work-history document.\n\
Analyze it and structure it as JSON in exactly the following format.\n\
\n\
Output format (JSON only, no explanation):\n\
{\n\
  \"summary\": \"A concise 2-3 sentence overview of the candidate\",\n\
  \"skills\": [\"skill 1\", \"skill 2\"],\n\
  \"experience\": [\n\
    {\n\
      \"company\": \"Company name\",\n\
      \"position\": \"Title or role\",\n\
      \"period\": \"Employment period (e.g. 2020-04 - 2023-03)\",\n\
      \"description\": \"Summary of the work\"\n\
    }\n\
  ],\n\
  \"education\": [\n\
    {\n\
      \"school\": \"School name\",\n\
      \"degree\": \"Degree or major\",\n\
      \"period\": \"Period of study\"\n\
    }\n\
  ],\n\
  \"certifications\": [\"certification 1\", \"certification 2\"]\n\
}\n\
\n\
Rules:\n\
- Use an empty array [] or an empty string \"\" when information is not found\n\
- Handle both Japanese and English text, keeping values in the source language\n\
- Do not guess or fill in anything; extract only what the text states\n\
- Output JSON only, with no prose and no Markdown code fences\n\
\n\
Résumé text:\n";

/// Structures normalized résumé text into an `AiAnalysis` with one call to
/// the injected language model.
pub struct ResumeAnalyzer {
    llm_client: Arc<dyn LlmClient>,
}

impl ResumeAnalyzer {
    pub fn new(llm_client: Arc<dyn LlmClient>) -> Self {
        Self { llm_client }
    }

    pub fn build_prompt(resume_text: &str) -> String {
        format!("{RESUME_ANALYSIS_PROMPT}{resume_text}")
    }

    #[tracing::instrument(skip_all, fields(text_chars = resume_text.chars().count()))]
    pub async fn analyze(&self, resume_text: &str) -> Result<AiAnalysis, AnalyzeError> {
        if resume_text.trim().is_empty() {
            return Err(AnalyzeError::InvalidResponse);
        }

        let prompt = Self::build_prompt(resume_text);
        let reply = self.llm_client.complete(&prompt).await?;

        tracing::debug!(reply_chars = reply.chars().count(), "Model reply received");

        let payload = parse_analysis_response(&reply).ok_or_else(|| {
            tracing::warn!("Model reply did not contain a parseable JSON object");
            AnalyzeError::ParseError
        })?;

        Ok(normalize_analysis(&payload))
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalyzeError {
    #[error("AI rate limit reached, wait a while and retry")]
    RateLimit,
    #[error("AI analysis failed: {0}")]
    ApiError(String),
    #[error("could not parse the AI response as JSON")]
    ParseError,
    #[error("resume text to analyze is empty")]
    InvalidResponse,
}

impl AnalyzeError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::RateLimit => "RATE_LIMIT",
            Self::ApiError(_) => "API_ERROR",
            Self::ParseError => "PARSE_ERROR",
            Self::InvalidResponse => "INVALID_RESPONSE",
        }
    }
}

impl From<LlmClientError> for AnalyzeError {
    fn from(err: LlmClientError) -> Self {
        match err {
            LlmClientError::RateLimited => Self::RateLimit,
            other => Self::ApiError(other.to_string()),
        }
    }
}
