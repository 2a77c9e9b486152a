mod ai_analysis;
mod analysis_status;
mod applicant_id;
mod blob_key;
mod resume;
mod resume_id;
mod resume_upload;
mod tenant_id;

pub use ai_analysis::{AiAnalysis, Education, WorkExperience};
pub use analysis_status::AnalysisStatus;
pub use applicant_id::ApplicantId;
pub use blob_key::{BlobKey, sanitize_file_name};
pub use resume::Resume;
pub use resume_id::ResumeId;
pub use resume_upload::{MAX_RESUME_BYTES, RESUME_CONTENT_TYPE, ResumeUpload, UploadValidationError};
pub use tenant_id::TenantId;
