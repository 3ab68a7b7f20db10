use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tracing::{error, info};

use crate::config::DatabaseConfig;
use crate::database::{run_migrations, SqliteDocumentStore};
use crate::persistence::{PersistenceError, PersistenceResult};

pub async fn get_database_pool(database_url: &str, config: &DatabaseConfig) -> PersistenceResult<SqlitePool> {
    info!("Connecting to document store: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
        .idle_timeout(Duration::from_secs(300))
        .test_before_acquire(true)
        .connect_with(options)
        .await
        .map_err(|e| {
            error!("Failed to create database pool: {}", e);
            e
        })?;

    info!("Database connection pool created successfully");
    Ok(pool)
}

/// Connects to the configured store and prepares its schema.
pub async fn open_document_store(config: &DatabaseConfig) -> PersistenceResult<SqliteDocumentStore> {
    let (Some(url), Some(name)) = (&config.url, &config.name) else {
        return Err(PersistenceError::StoreUnavailable);
    };

    let pool = get_database_pool(url, config).await?;
    run_migrations(pool.clone()).await?;

    info!("Document store ready (database '{}')", name);
    Ok(SqliteDocumentStore::new(pool, name.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DocumentStore;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_open_document_store_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clinic.db");
        let config = DatabaseConfig {
            url: Some(format!("sqlite:{}", path.display())),
            name: Some("vetclinic".to_string()),
            ..DatabaseConfig::default()
        };

        let store = open_document_store(&config).await.unwrap();
        assert!(path.exists());
        assert_eq!(store.database(), "vetclinic");
        assert!(store.collection_names().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_store_is_unavailable() {
        let config = DatabaseConfig {
            url: Some("sqlite::memory:".to_string()),
            ..DatabaseConfig::default()
        };

        let err = open_document_store(&config).await.err().unwrap();
        assert!(err.is_store_unavailable());
    }
}
