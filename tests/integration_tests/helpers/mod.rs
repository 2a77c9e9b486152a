mod test_app;
mod test_postgres;

pub use test_app::{TestApp, multipart_request};
pub use test_postgres::TestPostgres;
