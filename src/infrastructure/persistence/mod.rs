mod pg_pool;
mod repositories;

pub use repositories::InMemoryResumeRepository;
pub use repositories::PgResumeRepository;

pub use pg_pool::{create_pool, run_migrations};
