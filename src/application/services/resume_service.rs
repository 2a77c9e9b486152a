use std::sync::Arc;

use chrono::Utc;

use crate::application::ports::{
    BlobStore, ExtractionError, OcrError, OcrExtractor, RepositoryError, ResumeRepository,
    TextExtractor,
};
use crate::domain::{
    AiAnalysis, AnalysisStatus, ApplicantId, MAX_RESUME_BYTES, Resume, ResumeId, ResumeUpload,
    TenantId, UploadValidationError,
};

use super::resume_analyzer::{AnalyzeError, ResumeAnalyzer};
use super::text_normalizer::normalize_extracted_text;

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedResume {
    pub id: ResumeId,
    pub file_url: String,
}

/// Owns the résumé analysis lifecycle. The only component that writes
/// `analysis_status`.
pub struct ResumeService {
    repository: Arc<dyn ResumeRepository>,
    blob_store: Arc<dyn BlobStore>,
    text_extractor: Arc<dyn TextExtractor>,
    ocr_extractor: Arc<dyn OcrExtractor>,
    analyzer: ResumeAnalyzer,
    max_upload_bytes: usize,
}

impl ResumeService {
    pub fn new(
        repository: Arc<dyn ResumeRepository>,
        blob_store: Arc<dyn BlobStore>,
        text_extractor: Arc<dyn TextExtractor>,
        ocr_extractor: Arc<dyn OcrExtractor>,
        analyzer: ResumeAnalyzer,
    ) -> Self {
        Self {
            repository,
            blob_store,
            text_extractor,
            ocr_extractor,
            analyzer,
            max_upload_bytes: MAX_RESUME_BYTES,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    #[tracing::instrument(
        skip(self, upload),
        fields(
            tenant_id = %tenant_id,
            applicant_id = %applicant_id,
            file_name = %upload.file_name,
            bytes = upload.data.len(),
        )
    )]
    pub async fn upload_resume(
        &self,
        tenant_id: TenantId,
        applicant_id: ApplicantId,
        upload: ResumeUpload,
    ) -> Result<UploadedResume, ResumeServiceError> {
        if !self
            .repository
            .applicant_exists(tenant_id, applicant_id)
            .await?
        {
            return Err(ResumeServiceError::ApplicantNotFound);
        }

        if self
            .repository
            .find_by_applicant(tenant_id, applicant_id)
            .await?
            .is_some()
        {
            return Err(ResumeServiceError::AlreadyExists);
        }

        upload.validate(self.max_upload_bytes)?;

        let file_url = self
            .blob_store
            .upload(&tenant_id, &applicant_id, &upload.data, &upload.file_name)
            .await
            .map_err(|e| ResumeServiceError::Upload(e.to_string()))?;

        let resume = Resume::new(applicant_id, file_url, upload.file_name);

        if let Err(e) = self.repository.create(tenant_id, &resume).await {
            self.discard_blob(&resume.file_url).await;
            return Err(match e {
                RepositoryError::ConstraintViolation(_) => ResumeServiceError::AlreadyExists,
                RepositoryError::NotFound(_) => ResumeServiceError::ApplicantNotFound,
                other => ResumeServiceError::Repository(other),
            });
        }

        tracing::info!(resume_id = %resume.id, "Resume uploaded");

        Ok(UploadedResume {
            id: resume.id,
            file_url: resume.file_url,
        })
    }

    pub async fn get_resume(
        &self,
        tenant_id: TenantId,
        applicant_id: ApplicantId,
    ) -> Result<Resume, ResumeServiceError> {
        self.repository
            .find_by_applicant(tenant_id, applicant_id)
            .await?
            .ok_or(ResumeServiceError::NotFound)
    }

    #[tracing::instrument(
        skip(self),
        fields(tenant_id = %tenant_id, applicant_id = %applicant_id, resume_id = %resume_id)
    )]
    pub async fn analyze_resume(
        &self,
        tenant_id: TenantId,
        applicant_id: ApplicantId,
        resume_id: ResumeId,
    ) -> Result<Resume, ResumeServiceError> {
        let resume = self
            .repository
            .find_owned(tenant_id, applicant_id, resume_id)
            .await?
            .ok_or(ResumeServiceError::NotFound)?;

        let previous = self.repository.try_begin_processing(resume.id).await?;
        if !previous.can_start_analysis() {
            tracing::warn!(status = %previous, "Analysis already running, refusing to start");
            return Err(ResumeServiceError::AnalysisInProgress);
        }
        tracing::debug!(from = %previous, to = %AnalysisStatus::Processing, "Analysis status transition");

        match self.run_pipeline(&resume).await {
            Ok((extracted_text, analysis)) => {
                match self
                    .repository
                    .complete(resume.id, &extracted_text, &analysis, Utc::now())
                    .await
                {
                    Ok(updated) => {
                        tracing::info!(
                            skills = updated.ai_analysis.as_ref().map_or(0, |a| a.skills.len()),
                            "Resume analysis completed"
                        );
                        Ok(updated)
                    }
                    Err(e) => {
                        self.fail(resume.id, "persist").await;
                        Err(ResumeServiceError::Repository(e))
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, code = e.code().unwrap_or("-"), "Resume analysis failed");
                self.fail(resume.id, e.code().unwrap_or("pipeline")).await;
                Err(e)
            }
        }
    }

    /// Administrative recovery for an attempt that never reached a terminal
    /// status (caller timeout, process crash): `processing -> failed`.
    #[tracing::instrument(skip(self), fields(resume_id = %resume_id))]
    pub async fn reset_stuck_analysis(
        &self,
        tenant_id: TenantId,
        applicant_id: ApplicantId,
        resume_id: ResumeId,
    ) -> Result<Resume, ResumeServiceError> {
        let resume = self
            .repository
            .find_owned(tenant_id, applicant_id, resume_id)
            .await?
            .ok_or(ResumeServiceError::NotFound)?;

        if !resume
            .analysis_status
            .can_transition_to(AnalysisStatus::Failed)
        {
            return Err(ResumeServiceError::InvalidState(resume.analysis_status));
        }

        self.repository.mark_failed(resume.id).await?;
        tracing::info!("Stuck analysis reset to failed");

        self.repository
            .find_owned(tenant_id, applicant_id, resume_id)
            .await?
            .ok_or(ResumeServiceError::NotFound)
    }

    async fn run_pipeline(
        &self,
        resume: &Resume,
    ) -> Result<(String, AiAnalysis), ResumeServiceError> {
        let data = self
            .blob_store
            .download(&resume.file_url)
            .await
            .map_err(|e| ResumeServiceError::Download(e.to_string()))?;

        let raw_text = self.extract_text(&data).await?;

        let text = normalize_extracted_text(&raw_text);
        if text.is_empty() {
            return Err(ResumeServiceError::NoTextExtracted);
        }

        let analysis = self.analyzer.analyze(&text).await?;

        Ok((text, analysis))
    }

    async fn extract_text(&self, data: &[u8]) -> Result<String, ResumeServiceError> {
        let reason = match self.text_extractor.extract(data).await {
            Ok(extracted) if !extracted.text.trim().is_empty() => {
                tracing::debug!(page_count = extracted.page_count, "Text layer extracted");
                return Ok(extracted.text);
            }
            Ok(_) => "text layer contains only whitespace".to_string(),
            Err(ExtractionError::EmptyContent(reason)) => reason,
            Err(e) => return Err(ResumeServiceError::Extraction(e)),
        };

        tracing::info!(reason = %reason, "No usable text layer, falling back to OCR");
        match self.ocr_extractor.extract(data).await {
            Ok(ocr) => {
                tracing::info!(confidence = ocr.confidence, "OCR fallback succeeded");
                Ok(ocr.text)
            }
            Err(OcrError::EmptyContent(_)) => Err(ResumeServiceError::NoTextExtracted),
            Err(e) => Err(ResumeServiceError::Ocr(e)),
        }
    }

    async fn discard_blob(&self, file_url: &str) {
        if let Err(e) = self.blob_store.delete(file_url).await {
            tracing::warn!(error = %e, "Failed to remove stored file of rejected upload");
        }
    }

    async fn fail(&self, resume_id: ResumeId, stage: &str) {
        tracing::debug!(to = %AnalysisStatus::Failed, stage, "Analysis status transition");
        if let Err(e) = self.repository.mark_failed(resume_id).await {
            tracing::error!(error = %e, "Failed to record failed analysis status");
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResumeServiceError {
    #[error("resume not found")]
    NotFound,
    #[error("applicant not found")]
    ApplicantNotFound,
    #[error("this applicant already has a resume")]
    AlreadyExists,
    #[error("{0}")]
    InvalidUpload(#[from] UploadValidationError),
    #[error("an analysis is already in progress for this resume")]
    AnalysisInProgress,
    #[error("resume is {0}, expected processing")]
    InvalidState(AnalysisStatus),
    #[error("failed to upload the resume file: {0}")]
    Upload(String),
    #[error("failed to download the resume file: {0}")]
    Download(String),
    #[error("{0}")]
    Extraction(ExtractionError),
    #[error("{0}")]
    Ocr(OcrError),
    #[error("could not extract text from the resume; the PDF may contain only images")]
    NoTextExtracted,
    #[error("{0}")]
    Analysis(#[from] AnalyzeError),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}

impl ResumeServiceError {
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Extraction(e) => Some(e.code()),
            Self::Ocr(e) => Some(e.code()),
            Self::Analysis(e) => Some(e.code()),
            _ => None,
        }
    }
}
