use reqwest::StatusCode;

use crate::application::ports::LlmClientError;

/// Maps a non-success HTTP reply from a completion backend onto the client
/// error taxonomy.
pub(super) fn classify_http_error(status: StatusCode, body: &str) -> LlmClientError {
    if status == StatusCode::TOO_MANY_REQUESTS
        || body.contains("RESOURCE_EXHAUSTED")
        || body.contains("RATE_LIMIT")
    {
        return LlmClientError::RateLimited;
    }

    if matches!(
        status,
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
    ) && (body.contains("API key") || body.contains("API_KEY"))
    {
        return LlmClientError::Unauthorized;
    }

    LlmClientError::ApiRequestFailed(format!("HTTP {}: {}", status, body))
}
