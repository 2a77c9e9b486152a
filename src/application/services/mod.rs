mod analysis_parser;
mod resume_analyzer;
mod resume_service;
mod text_normalizer;

pub use analysis_parser::{normalize_analysis, parse_analysis_response};
pub use resume_analyzer::{AnalyzeError, RESUME_ANALYSIS_PROMPT, ResumeAnalyzer};
pub use resume_service::{ResumeService, ResumeServiceError, UploadedResume};
pub use text_normalizer::normalize_extracted_text;
