mod blob_store;
mod llm_client;
mod ocr_extractor;
mod repository_error;
mod resume_repository;
mod text_extractor;

pub use blob_store::{BlobStore, BlobStoreError};
pub use llm_client::{LlmClient, LlmClientError};
pub use ocr_extractor::{OcrError, OcrExtractor, OcrText};
pub use repository_error::RepositoryError;
pub use resume_repository::ResumeRepository;
pub use text_extractor::{ExtractedText, ExtractionError, TextExtractor};
