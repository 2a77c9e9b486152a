use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use chrono::{DateTime, Utc};
use resume_pipeline::application::ports::{
    BlobStore, BlobStoreError, ExtractedText, ExtractionError, LlmClient, LlmClientError,
    RepositoryError, ResumeRepository, TextExtractor,
};
use resume_pipeline::application::services::{ResumeAnalyzer, ResumeService, UploadedResume};
use resume_pipeline::domain::{
    AiAnalysis, AnalysisStatus, ApplicantId, Resume, ResumeId, ResumeUpload, TenantId,
};
use resume_pipeline::infrastructure::llm::MockLlmClient;
use resume_pipeline::infrastructure::ocr::MockOcrExtractor;
use resume_pipeline::infrastructure::persistence::InMemoryResumeRepository;
use resume_pipeline::infrastructure::storage::ObjectBlobStore;

pub struct StubTextExtractor {
    outcome: Result<ExtractedText, ExtractionError>,
    calls: AtomicUsize,
}

impl StubTextExtractor {
    pub fn with_text(text: &str) -> Self {
        Self::with_outcome(Ok(ExtractedText {
            text: text.to_string(),
            page_count: 1,
        }))
    }

    pub fn no_text_layer() -> Self {
        Self::with_outcome(Err(ExtractionError::EmptyContent(
            "PDF has no text layer".to_string(),
        )))
    }

    pub fn with_outcome(outcome: Result<ExtractedText, ExtractionError>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextExtractor for StubTextExtractor {
    async fn extract(&self, _data: &[u8]) -> Result<ExtractedText, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

/// Replies from a queue; falls back to the mock analysis once empty.
#[derive(Default)]
pub struct ScriptedLlmClient {
    replies: Mutex<VecDeque<Result<String, LlmClientError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLlmClient {
    pub fn new(replies: Vec<Result<String, LlmClientError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        self.prompts.lock().await.push(prompt.to_string());
        match self.replies.lock().await.pop_front() {
            Some(reply) => reply,
            None => MockLlmClient::new().complete(prompt).await,
        }
    }
}

/// Holds every call until `release` is notified, so tests can act while an
/// analysis is in flight.
#[derive(Default)]
pub struct GatedLlmClient {
    pub entered: Notify,
    pub release: Notify,
}

#[async_trait]
impl LlmClient for GatedLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        self.entered.notify_one();
        self.release.notified().await;
        MockLlmClient::new().complete(prompt).await
    }
}

/// Keeps every uploaded and deleted URL on top of an in-memory store.
pub struct RecordingBlobStore {
    pub inner: ObjectBlobStore,
    uploaded: Mutex<Vec<String>>,
    deleted: Mutex<Vec<String>>,
}

impl Default for RecordingBlobStore {
    fn default() -> Self {
        Self {
            inner: ObjectBlobStore::in_memory(),
            uploaded: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingBlobStore {
    pub async fn uploaded(&self) -> Vec<String> {
        self.uploaded.lock().await.clone()
    }

    pub async fn deleted(&self) -> Vec<String> {
        self.deleted.lock().await.clone()
    }
}

#[async_trait]
impl BlobStore for RecordingBlobStore {
    async fn upload(
        &self,
        tenant_id: &TenantId,
        owner_id: &ApplicantId,
        data: &[u8],
        file_name: &str,
    ) -> Result<String, BlobStoreError> {
        let url = self.inner.upload(tenant_id, owner_id, data, file_name).await?;
        self.uploaded.lock().await.push(url.clone());
        Ok(url)
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, BlobStoreError> {
        self.inner.download(url).await
    }

    async fn delete(&self, url: &str) -> Result<(), BlobStoreError> {
        self.deleted.lock().await.push(url.to_string());
        self.inner.delete(url).await
    }
}

/// Never sees an existing résumé on lookup, like a request that checked
/// before a concurrent upload committed.
#[derive(Default)]
pub struct StaleReadRepository {
    pub inner: InMemoryResumeRepository,
}

#[async_trait]
impl ResumeRepository for StaleReadRepository {
    async fn applicant_exists(
        &self,
        tenant_id: TenantId,
        applicant_id: ApplicantId,
    ) -> Result<bool, RepositoryError> {
        self.inner.applicant_exists(tenant_id, applicant_id).await
    }

    async fn create(&self, tenant_id: TenantId, resume: &Resume) -> Result<(), RepositoryError> {
        self.inner.create(tenant_id, resume).await
    }

    async fn find_by_applicant(
        &self,
        _tenant_id: TenantId,
        _applicant_id: ApplicantId,
    ) -> Result<Option<Resume>, RepositoryError> {
        Ok(None)
    }

    async fn find_owned(
        &self,
        tenant_id: TenantId,
        applicant_id: ApplicantId,
        resume_id: ResumeId,
    ) -> Result<Option<Resume>, RepositoryError> {
        self.inner.find_owned(tenant_id, applicant_id, resume_id).await
    }

    async fn try_begin_processing(&self, id: ResumeId) -> Result<AnalysisStatus, RepositoryError> {
        self.inner.try_begin_processing(id).await
    }

    async fn complete(
        &self,
        id: ResumeId,
        extracted_text: &str,
        analysis: &AiAnalysis,
        analyzed_at: DateTime<Utc>,
    ) -> Result<Resume, RepositoryError> {
        self.inner
            .complete(id, extracted_text, analysis, analyzed_at)
            .await
    }

    async fn mark_failed(&self, id: ResumeId) -> Result<(), RepositoryError> {
        self.inner.mark_failed(id).await
    }
}

pub struct ServiceHarness {
    pub service: Arc<ResumeService>,
    pub repository: Arc<InMemoryResumeRepository>,
    pub blob_store: Arc<ObjectBlobStore>,
    pub tenant_id: TenantId,
    pub applicant_id: ApplicantId,
}

impl ServiceHarness {
    pub async fn new(
        text_extractor: Arc<dyn TextExtractor>,
        ocr_extractor: Arc<MockOcrExtractor>,
        llm_client: Arc<dyn LlmClient>,
    ) -> Self {
        let repository = Arc::new(InMemoryResumeRepository::new());
        let blob_store = Arc::new(ObjectBlobStore::in_memory());
        let tenant_id = TenantId::new();
        let applicant_id = ApplicantId::new();
        repository.add_applicant(tenant_id, applicant_id).await;

        let service = Arc::new(ResumeService::new(
            repository.clone(),
            blob_store.clone(),
            text_extractor,
            ocr_extractor,
            ResumeAnalyzer::new(llm_client),
        ));

        Self {
            service,
            repository,
            blob_store,
            tenant_id,
            applicant_id,
        }
    }

    pub async fn upload(&self) -> UploadedResume {
        self.service
            .upload_resume(
                self.tenant_id,
                self.applicant_id,
                ResumeUpload::new("resume.pdf", b"%PDF-1.4 stub".to_vec()),
            )
            .await
            .expect("upload resume")
    }
}
