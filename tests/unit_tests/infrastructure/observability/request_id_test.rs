use axum::Router;
use axum::body::Body;
use axum::extract::Extension;
use axum::http::Request;
use axum::middleware;
use axum::routing::get;
use tower::ServiceExt;

use resume_pipeline::infrastructure::observability::{
    REQUEST_ID_HEADER, RequestId, request_id_middleware,
};

fn app() -> Router {
    Router::new()
        .route(
            "/",
            get(|Extension(id): Extension<RequestId>| async move { id.0 }),
        )
        .layer(middleware::from_fn(request_id_middleware))
}

#[tokio::test]
async fn given_incoming_request_id_when_handled_then_echoes_it() {
    let request = Request::builder()
        .uri("/")
        .header(REQUEST_ID_HEADER, "req-42")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-42");
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"req-42");
}

#[tokio::test]
async fn given_no_request_id_when_handled_then_generates_uuid() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let response = app().oneshot(request).await.unwrap();

    let generated = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok());
}

#[tokio::test]
async fn given_malformed_request_id_when_handled_then_replaces_it() {
    let request = Request::builder()
        .uri("/")
        .header(REQUEST_ID_HEADER, "id with spaces; drop table")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    let echoed = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(echoed).is_ok());
}

#[test]
fn given_overlong_request_id_when_reading_headers_then_mints_new_one() {
    let mut headers = axum::http::HeaderMap::new();
    headers.insert(REQUEST_ID_HEADER, "a".repeat(200).parse().unwrap());

    let id = RequestId::from_headers(&headers);

    assert!(uuid::Uuid::parse_str(&id.0).is_ok());
}
