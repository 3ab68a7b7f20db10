pub mod connection;
pub mod migrations;
pub mod store;

pub use connection::{get_database_pool, open_document_store};
pub use migrations::{run_migrations, MigrationManager};
pub use store::{DocumentStore, SqliteDocumentStore};
