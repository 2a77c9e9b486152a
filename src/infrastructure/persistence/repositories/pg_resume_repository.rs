use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{RepositoryError, ResumeRepository};
use crate::domain::{AiAnalysis, AnalysisStatus, ApplicantId, Resume, ResumeId, TenantId};

const RESUME_COLUMNS: &str = "r.id, r.applicant_id, r.file_url, r.file_name, r.extracted_text, \
     r.ai_analysis, r.analysis_status, r.analyzed_at, r.created_at";

#[derive(Clone)]
pub struct PgResumeRepository {
    pool: PgPool,
}

impl PgResumeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Registers an applicant row. Applicant CRUD lives outside this service;
    /// this exists for seeding and tests.
    #[instrument(skip(self, name))]
    pub async fn insert_applicant(
        &self,
        tenant_id: TenantId,
        applicant_id: ApplicantId,
        name: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO applicants (id, tenant_id, name)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(applicant_id.as_uuid())
        .bind(tenant_id.as_uuid())
        .bind(name)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }
}

fn query_failed(e: sqlx::Error) -> RepositoryError {
    RepositoryError::QueryFailed(e.to_string())
}

fn row_to_resume(row: &PgRow) -> Result<Resume, RepositoryError> {
    let status: String = row.try_get("analysis_status").map_err(query_failed)?;
    let analysis_status = status
        .parse::<AnalysisStatus>()
        .map_err(RepositoryError::Serialization)?;
    let ai_analysis: Option<Json<AiAnalysis>> = row
        .try_get("ai_analysis")
        .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

    Ok(Resume {
        id: ResumeId::from_uuid(row.try_get::<Uuid, _>("id").map_err(query_failed)?),
        applicant_id: ApplicantId::from_uuid(
            row.try_get::<Uuid, _>("applicant_id")
                .map_err(query_failed)?,
        ),
        file_url: row.try_get("file_url").map_err(query_failed)?,
        file_name: row.try_get("file_name").map_err(query_failed)?,
        extracted_text: row.try_get("extracted_text").map_err(query_failed)?,
        ai_analysis: ai_analysis.map(|Json(a)| a),
        analysis_status,
        analyzed_at: row.try_get("analyzed_at").map_err(query_failed)?,
        created_at: row.try_get("created_at").map_err(query_failed)?,
    })
}

#[async_trait]
impl ResumeRepository for PgResumeRepository {
    #[instrument(skip(self))]
    async fn applicant_exists(
        &self,
        tenant_id: TenantId,
        applicant_id: ApplicantId,
    ) -> Result<bool, RepositoryError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM applicants WHERE id = $1 AND tenant_id = $2)",
        )
        .bind(applicant_id.as_uuid())
        .bind(tenant_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(query_failed)?;

        Ok(exists)
    }

    #[instrument(skip(self, resume), fields(resume_id = %resume.id))]
    async fn create(&self, tenant_id: TenantId, resume: &Resume) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO resumes
                (id, applicant_id, file_url, file_name, extracted_text, ai_analysis,
                 analysis_status, analyzed_at, created_at)
            SELECT $1, $2, $3, $4, $5, $6, $7, $8, $9
            WHERE EXISTS (SELECT 1 FROM applicants WHERE id = $2 AND tenant_id = $10)
            "#,
        )
        .bind(resume.id.as_uuid())
        .bind(resume.applicant_id.as_uuid())
        .bind(&resume.file_url)
        .bind(&resume.file_name)
        .bind(resume.extracted_text.as_deref())
        .bind(resume.ai_analysis.as_ref().map(Json))
        .bind(resume.analysis_status.as_str())
        .bind(resume.analyzed_at)
        .bind(resume.created_at)
        .bind(tenant_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepositoryError::ConstraintViolation(db.message().to_string())
            }
            other => query_failed(other),
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "applicant {} in tenant {tenant_id}",
                resume.applicant_id
            )));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_applicant(
        &self,
        tenant_id: TenantId,
        applicant_id: ApplicantId,
    ) -> Result<Option<Resume>, RepositoryError> {
        let sql = format!(
            "SELECT {RESUME_COLUMNS} FROM resumes r \
             JOIN applicants a ON a.id = r.applicant_id \
             WHERE r.applicant_id = $1 AND a.tenant_id = $2"
        );
        let row = sqlx::query(&sql)
            .bind(applicant_id.as_uuid())
            .bind(tenant_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?;

        row.as_ref().map(row_to_resume).transpose()
    }

    #[instrument(skip(self))]
    async fn find_owned(
        &self,
        tenant_id: TenantId,
        applicant_id: ApplicantId,
        resume_id: ResumeId,
    ) -> Result<Option<Resume>, RepositoryError> {
        let sql = format!(
            "SELECT {RESUME_COLUMNS} FROM resumes r \
             JOIN applicants a ON a.id = r.applicant_id \
             WHERE r.id = $1 AND r.applicant_id = $2 AND a.tenant_id = $3"
        );
        let row = sqlx::query(&sql)
            .bind(resume_id.as_uuid())
            .bind(applicant_id.as_uuid())
            .bind(tenant_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?;

        row.as_ref().map(row_to_resume).transpose()
    }

    #[instrument(skip(self), fields(resume_id = %id))]
    async fn try_begin_processing(&self, id: ResumeId) -> Result<AnalysisStatus, RepositoryError> {
        // The row lock serializes racing starters; the loser re-reads
        // `processing` and leaves the row alone.
        let previous: Option<String> = sqlx::query_scalar(
            r#"
            WITH current AS (
                SELECT id, analysis_status FROM resumes WHERE id = $1 FOR UPDATE
            ),
            started AS (
                UPDATE resumes r
                SET analysis_status = 'processing'
                FROM current c
                WHERE r.id = c.id
                  AND c.analysis_status IN ('pending', 'failed', 'completed')
                RETURNING r.id
            )
            SELECT analysis_status FROM current
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed)?;

        previous
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?
            .parse::<AnalysisStatus>()
            .map_err(RepositoryError::Serialization)
    }

    #[instrument(skip(self, extracted_text, analysis), fields(resume_id = %id))]
    async fn complete(
        &self,
        id: ResumeId,
        extracted_text: &str,
        analysis: &AiAnalysis,
        analyzed_at: DateTime<Utc>,
    ) -> Result<Resume, RepositoryError> {
        let sql = format!(
            "UPDATE resumes r \
             SET extracted_text = $2, ai_analysis = $3, \
                 analysis_status = 'completed', analyzed_at = $4 \
             WHERE r.id = $1 AND r.analysis_status = 'processing' \
             RETURNING {RESUME_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .bind(extracted_text)
            .bind(Json(analysis))
            .bind(analyzed_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?;

        match row {
            Some(row) => row_to_resume(&row),
            None => Err(RepositoryError::NotFound(format!(
                "resume {id} is not processing"
            ))),
        }
    }

    #[instrument(skip(self), fields(resume_id = %id))]
    async fn mark_failed(&self, id: ResumeId) -> Result<(), RepositoryError> {
        sqlx::query(
            "UPDATE resumes SET analysis_status = 'failed' \
             WHERE id = $1 AND analysis_status = 'processing'",
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(query_failed)?;

        Ok(())
    }
}
