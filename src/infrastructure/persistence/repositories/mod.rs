mod in_memory_resume_repository;
mod pg_resume_repository;

pub use in_memory_resume_repository::InMemoryResumeRepository;
pub use pg_resume_repository::PgResumeRepository;
