use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};

use resume_pipeline::application::services::{ResumeAnalyzer, ResumeService};
use resume_pipeline::domain::{ApplicantId, TenantId};
use resume_pipeline::infrastructure::llm::MockLlmClient;
use resume_pipeline::infrastructure::ocr::MockOcrExtractor;
use resume_pipeline::infrastructure::persistence::InMemoryResumeRepository;
use resume_pipeline::infrastructure::storage::ObjectBlobStore;
use resume_pipeline::infrastructure::text_processing::MockTextExtractor;
use resume_pipeline::presentation::{AppState, Settings, create_router};

const BOUNDARY: &str = "resume-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub tenant_id: TenantId,
    pub applicant_id: ApplicantId,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_settings(Settings::default()).await
    }

    pub async fn with_settings(settings: Settings) -> Self {
        let repository = Arc::new(InMemoryResumeRepository::new());
        let tenant_id = TenantId::new();
        let applicant_id = ApplicantId::new();
        repository.add_applicant(tenant_id, applicant_id).await;

        let blob_store = Arc::new(ObjectBlobStore::in_memory());
        let resume_service = ResumeService::new(
            repository,
            blob_store.clone(),
            Arc::new(MockTextExtractor::new(
                "山田 太郎\n\nReact と TypeScript でフロントエンド開発を5年担当。",
            )),
            Arc::new(MockOcrExtractor::empty()),
            ResumeAnalyzer::new(Arc::new(MockLlmClient::new())),
        )
        .with_max_upload_bytes(settings.upload.max_bytes);

        let state = AppState {
            resume_service: Arc::new(resume_service),
            blob_store,
            settings,
        };

        Self {
            router: create_router(state),
            tenant_id,
            applicant_id,
        }
    }

    pub fn resume_path(&self) -> String {
        format!(
            "/api/v1/tenants/{}/applicants/{}/resume",
            self.tenant_id, self.applicant_id
        )
    }
}

pub fn multipart_request(uri: &str, file_name: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/pdf\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
