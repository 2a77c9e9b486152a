use chrono::{DateTime, Utc};

use super::{AiAnalysis, AnalysisStatus, ApplicantId, ResumeId};

#[derive(Debug, Clone, PartialEq)]
pub struct Resume {
    pub id: ResumeId,
    pub applicant_id: ApplicantId,
    pub file_url: String,
    pub file_name: String,
    pub extracted_text: Option<String>,
    pub ai_analysis: Option<AiAnalysis>,
    pub analysis_status: AnalysisStatus,
    pub analyzed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Resume {
    pub fn new(applicant_id: ApplicantId, file_url: String, file_name: String) -> Self {
        Self {
            id: ResumeId::new(),
            applicant_id,
            file_url,
            file_name,
            extracted_text: None,
            ai_analysis: None,
            analysis_status: AnalysisStatus::Pending,
            analyzed_at: None,
            created_at: Utc::now(),
        }
    }
}
