pub const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;
pub const RESUME_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Clone, PartialEq)]
pub struct ResumeUpload {
    pub file_name: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadValidationError {
    #[error("only PDF files can be uploaded")]
    NotPdf,
    #[error("file exceeds the {limit} byte limit ({actual} bytes)")]
    TooLarge { limit: usize, actual: usize },
    #[error("file is empty")]
    Empty,
}

impl ResumeUpload {
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            data,
        }
    }

    pub fn validate(&self, max_bytes: usize) -> Result<(), UploadValidationError> {
        if !self.file_name.to_lowercase().ends_with(".pdf") {
            return Err(UploadValidationError::NotPdf);
        }
        if self.data.is_empty() {
            return Err(UploadValidationError::Empty);
        }
        if self.data.len() > max_bytes {
            return Err(UploadValidationError::TooLarge {
                limit: max_bytes,
                actual: self.data.len(),
            });
        }
        Ok(())
    }
}
