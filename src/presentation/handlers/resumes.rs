use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::application::ports::BlobStoreError;
use crate::application::services::UploadedResume;
use crate::domain::{
    AiAnalysis, AnalysisStatus, ApplicantId, RESUME_CONTENT_TYPE, Resume, ResumeId, ResumeUpload,
    TenantId,
};
use crate::infrastructure::storage::LOCAL_URL_PREFIX;
use crate::presentation::state::AppState;

use super::error::{ApiError, ErrorResponse};

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub id: Uuid,
    pub file_url: String,
}

impl From<UploadedResume> for UploadResponse {
    fn from(uploaded: UploadedResume) -> Self {
        Self {
            id: uploaded.id.as_uuid(),
            file_url: uploaded.file_url,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeResponse {
    pub id: Uuid,
    pub applicant_id: Uuid,
    pub file_url: String,
    pub file_name: String,
    pub extracted_text: Option<String>,
    pub ai_analysis: Option<AiAnalysis>,
    pub analysis_status: AnalysisStatus,
    pub analyzed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Resume> for ResumeResponse {
    fn from(resume: Resume) -> Self {
        Self {
            id: resume.id.as_uuid(),
            applicant_id: resume.applicant_id.as_uuid(),
            file_url: resume.file_url,
            file_name: resume.file_name,
            extracted_text: resume.extracted_text,
            ai_analysis: resume.ai_analysis,
            analysis_status: resume.analysis_status,
            analyzed_at: resume.analyzed_at,
            created_at: resume.created_at,
        }
    }
}

fn bad_request(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_resume_handler(
    State(state): State<AppState>,
    Path((tenant_id, applicant_id)): Path<(Uuid, Uuid)>,
    mut multipart: Multipart,
) -> Response {
    let mut upload: Option<ResumeUpload> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return bad_request(e.status(), format!("Failed to read multipart: {}", e));
            }
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("unknown").to_string();
        match field.bytes().await {
            Ok(data) => {
                upload = Some(ResumeUpload::new(file_name, data.to_vec()));
                break;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read file bytes");
                return bad_request(e.status(), format!("Failed to read file: {}", e));
            }
        }
    }

    let Some(upload) = upload else {
        tracing::warn!("Upload request without a file field");
        return bad_request(StatusCode::BAD_REQUEST, "No file uploaded");
    };

    match state
        .resume_service
        .upload_resume(
            TenantId::from_uuid(tenant_id),
            ApplicantId::from_uuid(applicant_id),
            upload,
        )
        .await
    {
        Ok(uploaded) => (StatusCode::CREATED, Json(UploadResponse::from(uploaded))).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

#[tracing::instrument(skip(state))]
pub async fn get_resume_handler(
    State(state): State<AppState>,
    Path((tenant_id, applicant_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ResumeResponse>, ApiError> {
    let resume = state
        .resume_service
        .get_resume(
            TenantId::from_uuid(tenant_id),
            ApplicantId::from_uuid(applicant_id),
        )
        .await?;
    Ok(Json(resume.into()))
}

#[tracing::instrument(skip(state))]
pub async fn analyze_resume_handler(
    State(state): State<AppState>,
    Path((tenant_id, applicant_id, resume_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Json<ResumeResponse>, ApiError> {
    let resume = state
        .resume_service
        .analyze_resume(
            TenantId::from_uuid(tenant_id),
            ApplicantId::from_uuid(applicant_id),
            ResumeId::from_uuid(resume_id),
        )
        .await?;
    Ok(Json(resume.into()))
}

#[tracing::instrument(skip(state))]
pub async fn reset_analysis_handler(
    State(state): State<AppState>,
    Path((tenant_id, applicant_id, resume_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Json<ResumeResponse>, ApiError> {
    let resume = state
        .resume_service
        .reset_stuck_analysis(
            TenantId::from_uuid(tenant_id),
            ApplicantId::from_uuid(applicant_id),
            ResumeId::from_uuid(resume_id),
        )
        .await?;
    Ok(Json(resume.into()))
}

/// Serves files written by the local and in-memory stores, whose URLs are
/// relative to this service.
#[tracing::instrument(skip(state))]
pub async fn download_file_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Response {
    let url = format!("{LOCAL_URL_PREFIX}/{key}");
    match state.blob_store.download(&url).await {
        Ok(data) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, RESUME_CONTENT_TYPE)],
            data,
        )
            .into_response(),
        Err(BlobStoreError::NotFound(_) | BlobStoreError::InvalidUrl(_)) => {
            bad_request(StatusCode::NOT_FOUND, "File not found")
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read stored file");
            bad_request(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read file")
        }
    }
}
