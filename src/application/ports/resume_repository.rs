use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::RepositoryError;
use crate::domain::{AiAnalysis, AnalysisStatus, ApplicantId, Resume, ResumeId, TenantId};

/// Relational store for résumé records and the applicant ownership checks
/// the pipeline needs.
#[async_trait]
pub trait ResumeRepository: Send + Sync {
    async fn applicant_exists(
        &self,
        tenant_id: TenantId,
        applicant_id: ApplicantId,
    ) -> Result<bool, RepositoryError>;

    /// Fails with `NotFound` unless the applicant belongs to `tenant_id`, and
    /// with `ConstraintViolation` if the applicant already has a résumé.
    async fn create(&self, tenant_id: TenantId, resume: &Resume) -> Result<(), RepositoryError>;

    async fn find_by_applicant(
        &self,
        tenant_id: TenantId,
        applicant_id: ApplicantId,
    ) -> Result<Option<Resume>, RepositoryError>;

    async fn find_owned(
        &self,
        tenant_id: TenantId,
        applicant_id: ApplicantId,
        resume_id: ResumeId,
    ) -> Result<Option<Resume>, RepositoryError>;

    /// Atomically moves the record to `processing` when its current status is
    /// in `AnalysisStatus::STARTABLE`. Returns the status observed before the
    /// write; the transition happened iff the returned status is startable.
    async fn try_begin_processing(
        &self,
        id: ResumeId,
    ) -> Result<AnalysisStatus, RepositoryError>;

    /// `processing -> completed`, replacing text and analysis.
    async fn complete(
        &self,
        id: ResumeId,
        extracted_text: &str,
        analysis: &AiAnalysis,
        analyzed_at: DateTime<Utc>,
    ) -> Result<Resume, RepositoryError>;

    /// `processing -> failed`. Prior text and analysis stay untouched.
    async fn mark_failed(&self, id: ResumeId) -> Result<(), RepositoryError>;
}
