use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::application::ports::{RepositoryError, ResumeRepository};
use crate::domain::{AiAnalysis, AnalysisStatus, ApplicantId, Resume, ResumeId, TenantId};

/// Process-local résumé store. Status changes happen under one write lock,
/// so `try_begin_processing` is a true compare-and-swap.
#[derive(Default)]
pub struct InMemoryResumeRepository {
    applicants: RwLock<HashSet<(TenantId, ApplicantId)>>,
    resumes: RwLock<HashMap<ResumeId, (TenantId, Resume)>>,
    accept_any_applicant: bool,
}

impl InMemoryResumeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treats every `(tenant, applicant)` pair as registered. Used when the
    /// service runs without the surrounding applicant database.
    pub fn accepting_any_applicant() -> Self {
        Self {
            accept_any_applicant: true,
            ..Self::default()
        }
    }

    pub async fn add_applicant(&self, tenant_id: TenantId, applicant_id: ApplicantId) {
        self.applicants
            .write()
            .await
            .insert((tenant_id, applicant_id));
    }

    pub async fn get(&self, id: ResumeId) -> Option<Resume> {
        self.resumes.read().await.get(&id).map(|(_, r)| r.clone())
    }
}

#[async_trait]
impl ResumeRepository for InMemoryResumeRepository {
    async fn applicant_exists(
        &self,
        tenant_id: TenantId,
        applicant_id: ApplicantId,
    ) -> Result<bool, RepositoryError> {
        if self.accept_any_applicant {
            self.add_applicant(tenant_id, applicant_id).await;
            return Ok(true);
        }
        Ok(self
            .applicants
            .read()
            .await
            .contains(&(tenant_id, applicant_id)))
    }

    async fn create(&self, tenant_id: TenantId, resume: &Resume) -> Result<(), RepositoryError> {
        if !self
            .applicants
            .read()
            .await
            .contains(&(tenant_id, resume.applicant_id))
        {
            return Err(RepositoryError::NotFound(format!(
                "applicant {} in tenant {tenant_id}",
                resume.applicant_id
            )));
        }

        let mut resumes = self.resumes.write().await;
        if resumes
            .values()
            .any(|(t, r)| *t == tenant_id && r.applicant_id == resume.applicant_id)
        {
            return Err(RepositoryError::ConstraintViolation(
                "resumes_applicant_id_key".to_string(),
            ));
        }
        resumes.insert(resume.id, (tenant_id, resume.clone()));
        Ok(())
    }

    async fn find_by_applicant(
        &self,
        tenant_id: TenantId,
        applicant_id: ApplicantId,
    ) -> Result<Option<Resume>, RepositoryError> {
        Ok(self
            .resumes
            .read()
            .await
            .values()
            .find(|(t, r)| *t == tenant_id && r.applicant_id == applicant_id)
            .map(|(_, r)| r.clone()))
    }

    async fn find_owned(
        &self,
        tenant_id: TenantId,
        applicant_id: ApplicantId,
        resume_id: ResumeId,
    ) -> Result<Option<Resume>, RepositoryError> {
        Ok(self
            .resumes
            .read()
            .await
            .get(&resume_id)
            .filter(|(t, r)| *t == tenant_id && r.applicant_id == applicant_id)
            .map(|(_, r)| r.clone()))
    }

    async fn try_begin_processing(&self, id: ResumeId) -> Result<AnalysisStatus, RepositoryError> {
        let mut resumes = self.resumes.write().await;
        let (_, resume) = resumes
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        let previous = resume.analysis_status;
        if previous.can_start_analysis() {
            resume.analysis_status = AnalysisStatus::Processing;
        }
        Ok(previous)
    }

    async fn complete(
        &self,
        id: ResumeId,
        extracted_text: &str,
        analysis: &AiAnalysis,
        analyzed_at: DateTime<Utc>,
    ) -> Result<Resume, RepositoryError> {
        let mut resumes = self.resumes.write().await;
        let (_, resume) = resumes
            .get_mut(&id)
            .filter(|(_, r)| r.analysis_status == AnalysisStatus::Processing)
            .ok_or_else(|| RepositoryError::NotFound(format!("resume {id} is not processing")))?;

        resume.extracted_text = Some(extracted_text.to_string());
        resume.ai_analysis = Some(analysis.clone());
        resume.analysis_status = AnalysisStatus::Completed;
        resume.analyzed_at = Some(analyzed_at);
        Ok(resume.clone())
    }

    async fn mark_failed(&self, id: ResumeId) -> Result<(), RepositoryError> {
        let mut resumes = self.resumes.write().await;
        if let Some((_, resume)) = resumes.get_mut(&id) {
            if resume.analysis_status == AnalysisStatus::Processing {
                resume.analysis_status = AnalysisStatus::Failed;
            }
        }
        Ok(())
    }
}
