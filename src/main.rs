use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use resume_pipeline::application::ports::ResumeRepository;
use resume_pipeline::application::services::{ResumeAnalyzer, ResumeService};
use resume_pipeline::infrastructure::llm::LlmClientFactory;
use resume_pipeline::infrastructure::observability::{TracingConfig, init_tracing};
use resume_pipeline::infrastructure::ocr::OcrExtractorFactory;
use resume_pipeline::infrastructure::persistence::{
    InMemoryResumeRepository, PgResumeRepository, create_pool, run_migrations,
};
use resume_pipeline::infrastructure::storage::BlobStoreFactory;
use resume_pipeline::infrastructure::text_processing::TextExtractorFactory;
use resume_pipeline::presentation::config::{RepositoryProvider, Settings};
use resume_pipeline::presentation::{AppState, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let (environment, settings) = Settings::load().context("failed to load settings")?;

    init_tracing(&TracingConfig::from_settings(
        environment.as_str(),
        &settings.logging,
    ));

    let repository: Arc<dyn ResumeRepository> = match settings.database.provider {
        RepositoryProvider::Postgres => {
            let pool = create_pool(&settings.database)
                .await
                .context("failed to connect to PostgreSQL")?;
            if settings.database.run_migrations {
                run_migrations(&pool).await?;
            }
            Arc::new(PgResumeRepository::new(pool))
        }
        RepositoryProvider::Memory => {
            tracing::warn!("Using in-memory repository, records are lost on restart");
            Arc::new(InMemoryResumeRepository::accepting_any_applicant())
        }
    };

    let blob_store =
        BlobStoreFactory::create(&settings.storage).context("failed to initialize storage")?;
    let text_extractor = TextExtractorFactory::create(&settings.extraction);
    let ocr_extractor = OcrExtractorFactory::create(&settings.ocr);
    let llm_client =
        LlmClientFactory::create(&settings.llm).context("failed to initialize LLM client")?;

    let resume_service = Arc::new(
        ResumeService::new(
            repository,
            Arc::clone(&blob_store),
            text_extractor,
            ocr_extractor,
            ResumeAnalyzer::new(llm_client),
        )
        .with_max_upload_bytes(settings.upload.max_bytes),
    );

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;

    let state = AppState {
        resume_service,
        blob_store,
        settings,
    };

    let router = create_router(state);

    tracing::info!(%addr, environment = %environment, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
