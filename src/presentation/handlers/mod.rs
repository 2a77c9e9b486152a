mod error;
mod health;
mod resumes;

pub use error::{ApiError, ErrorResponse, status_for};
pub use health::{HealthResponse, health_handler};
pub use resumes::{
    ResumeResponse, UploadResponse, analyze_resume_handler, download_file_handler,
    get_resume_handler, reset_analysis_handler, upload_resume_handler,
};
