use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use tower::ServiceExt;
use uuid::Uuid;

use resume_pipeline::presentation::Settings;

use crate::helpers::{TestApp, multipart_request};

const PDF_BYTES: &[u8] = b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog >>\nendobj\n%%EOF";

async fn json_body(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn upload(app: &TestApp) -> serde_json::Value {
    let response = app
        .router
        .clone()
        .oneshot(multipart_request(&app.resume_path(), "cv.pdf", PDF_BYTES))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

#[tokio::test]
async fn given_running_server_when_health_check_then_returns_healthy() {
    let app = TestApp::new().await;

    let response = app.router.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "resume-pipeline");
}

#[tokio::test]
async fn given_pdf_when_uploading_then_returns_created_with_pending_resume() {
    let app = TestApp::new().await;

    let uploaded = upload(&app).await;
    let response = app
        .router
        .clone()
        .oneshot(get(&app.resume_path()))
        .await
        .unwrap();

    assert!(Uuid::parse_str(uploaded["id"].as_str().unwrap()).is_ok());
    assert!(uploaded["fileUrl"].as_str().unwrap().ends_with("_cv.pdf"));
    assert_eq!(response.status(), StatusCode::OK);
    let resume = json_body(response).await;
    assert_eq!(resume["id"], uploaded["id"]);
    assert_eq!(resume["analysisStatus"], "pending");
    assert_eq!(resume["fileName"], "cv.pdf");
    assert!(resume["aiAnalysis"].is_null());
}

#[tokio::test]
async fn given_uploaded_resume_when_analyzing_then_returns_completed_analysis() {
    let app = TestApp::new().await;
    let uploaded = upload(&app).await;
    let analyze_uri = format!(
        "{}/{}/analyze",
        app.resume_path(),
        uploaded["id"].as_str().unwrap()
    );

    let response = app.router.clone().oneshot(post(&analyze_uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let resume = json_body(response).await;
    assert_eq!(resume["analysisStatus"], "completed");
    assert!(resume["analyzedAt"].is_string());
    assert!(resume["extractedText"].as_str().unwrap().contains("山田 太郎"));
    let skills = resume["aiAnalysis"]["skills"].as_array().unwrap();
    assert!(skills.iter().any(|s| s == "React"));
}

#[tokio::test]
async fn given_completed_resume_when_analyzing_again_then_succeeds() {
    let app = TestApp::new().await;
    let uploaded = upload(&app).await;
    let analyze_uri = format!(
        "{}/{}/analyze",
        app.resume_path(),
        uploaded["id"].as_str().unwrap()
    );
    app.router.clone().oneshot(post(&analyze_uri)).await.unwrap();

    let response = app.router.clone().oneshot(post(&analyze_uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["analysisStatus"], "completed");
}

#[tokio::test]
async fn given_existing_resume_when_uploading_again_then_returns_conflict() {
    let app = TestApp::new().await;
    upload(&app).await;

    let response = app
        .router
        .clone()
        .oneshot(multipart_request(&app.resume_path(), "cv2.pdf", PDF_BYTES))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn given_non_pdf_when_uploading_then_returns_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(multipart_request(&app.resume_path(), "cv.docx", b"PK\x03\x04"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_oversized_file_when_uploading_then_returns_payload_too_large() {
    let mut settings = Settings::default();
    settings.upload.max_bytes = 16;
    let app = TestApp::with_settings(settings).await;

    let response = app
        .router
        .clone()
        .oneshot(multipart_request(&app.resume_path(), "cv.pdf", PDF_BYTES))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn given_unknown_applicant_when_uploading_then_returns_not_found() {
    let app = TestApp::new().await;
    let uri = format!(
        "/api/v1/tenants/{}/applicants/{}/resume",
        app.tenant_id,
        Uuid::new_v4()
    );

    let response = app
        .router
        .clone()
        .oneshot(multipart_request(&uri, "cv.pdf", PDF_BYTES))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_no_resume_when_getting_then_returns_not_found() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(get(&app.resume_path()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_unknown_resume_when_analyzing_then_returns_not_found() {
    let app = TestApp::new().await;
    upload(&app).await;
    let uri = format!("{}/{}/analyze", app.resume_path(), Uuid::new_v4());

    let response = app.router.clone().oneshot(post(&uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_pending_resume_when_resetting_then_returns_conflict() {
    let app = TestApp::new().await;
    let uploaded = upload(&app).await;
    let uri = format!(
        "{}/{}/reset",
        app.resume_path(),
        uploaded["id"].as_str().unwrap()
    );

    let response = app.router.clone().oneshot(post(&uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn given_uploaded_resume_when_fetching_file_url_then_returns_pdf_bytes() {
    let app = TestApp::new().await;
    let uploaded = upload(&app).await;

    let response = app
        .router
        .clone()
        .oneshot(get(uploaded["fileUrl"].as_str().unwrap()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/pdf");
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], PDF_BYTES);
}

#[tokio::test]
async fn given_missing_file_when_fetching_then_returns_not_found() {
    let app = TestApp::new().await;

    let response = app
        .router
        .oneshot(get("/api/resumes/t/a/1_missing.pdf"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_request_with_id_when_any_endpoint_then_response_echoes_request_id() {
    let app = TestApp::new().await;
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "test-request-123")
        .body(Body::empty())
        .unwrap();

    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.headers()["x-request-id"], "test-request-123");
}
