use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::{AnalyzeError, ResumeServiceError};
use crate::domain::UploadValidationError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: None,
        }
    }
}

pub struct ApiError(pub ResumeServiceError);

impl From<ResumeServiceError> for ApiError {
    fn from(err: ResumeServiceError) -> Self {
        Self(err)
    }
}

pub fn status_for(err: &ResumeServiceError) -> StatusCode {
    match err {
        ResumeServiceError::NotFound | ResumeServiceError::ApplicantNotFound => {
            StatusCode::NOT_FOUND
        }
        ResumeServiceError::AlreadyExists
        | ResumeServiceError::AnalysisInProgress
        | ResumeServiceError::InvalidState(_) => StatusCode::CONFLICT,
        ResumeServiceError::InvalidUpload(UploadValidationError::TooLarge { .. }) => {
            StatusCode::PAYLOAD_TOO_LARGE
        }
        ResumeServiceError::InvalidUpload(_) => StatusCode::BAD_REQUEST,
        ResumeServiceError::Analysis(AnalyzeError::RateLimit) => StatusCode::TOO_MANY_REQUESTS,
        ResumeServiceError::Extraction(_)
        | ResumeServiceError::Ocr(_)
        | ResumeServiceError::NoTextExtracted
        | ResumeServiceError::Analysis(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ResumeServiceError::Upload(_)
        | ResumeServiceError::Download(_)
        | ResumeServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        let body = match &self.0 {
            ResumeServiceError::Repository(e) => {
                tracing::error!(error = %e, "Repository failure");
                ErrorResponse::new("internal server error")
            }
            other => ErrorResponse {
                error: other.to_string(),
                code: other.code(),
            },
        };
        (status, Json(body)).into_response()
    }
}
