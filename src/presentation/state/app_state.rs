use std::sync::Arc;

use crate::application::ports::BlobStore;
use crate::application::services::ResumeService;
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub resume_service: Arc<ResumeService>,
    pub blob_store: Arc<dyn BlobStore>,
    pub settings: Settings,
}
