use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    analyze_resume_handler, download_file_handler, get_resume_handler, health_handler,
    reset_analysis_handler, upload_resume_handler,
};
use crate::presentation::state::AppState;

pub const RESUME_PATH: &str = "/api/v1/tenants/{tenant_id}/applicants/{applicant_id}/resume";
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Room for multipart framing around a maximum-size file.
    let body_limit = state.settings.upload.max_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health_handler))
        .route(
            RESUME_PATH,
            post(upload_resume_handler).get(get_resume_handler),
        )
        .route(
            &format!("{RESUME_PATH}/{{resume_id}}/analyze"),
            post(analyze_resume_handler),
        )
        .route(
            &format!("{RESUME_PATH}/{{resume_id}}/reset"),
            post(reset_analysis_handler),
        )
        .route("/api/resumes/{*key}", get(download_file_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
