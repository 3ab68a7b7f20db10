use sqlx::{Row, SqlitePool};
use tracing::{error, info};

pub struct MigrationManager {
    pool: SqlitePool,
}

impl MigrationManager {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        info!("Starting document store migrations");

        self.create_migrations_table().await?;

        let current_version = self.get_current_version().await?;
        info!("Current migration version: {}", current_version);

        let mut applied_count = 0;
        for migration in migrations() {
            if migration.version > current_version {
                info!("Applying migration {}: {}", migration.version, migration.name);
                self.apply_migration(&migration).await?;
                applied_count += 1;
            }
        }

        if applied_count > 0 {
            info!("Applied {} migrations successfully", applied_count);
        } else {
            info!("No new migrations to apply");
        }

        Ok(())
    }

    async fn create_migrations_table(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                checksum TEXT NOT NULL
            )
        "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_current_version(&self) -> Result<i64, sqlx::Error> {
        let row = sqlx::query("SELECT COALESCE(MAX(version), 0) AS version FROM _migrations")
            .fetch_one(&self.pool)
            .await?;

        row.try_get("version")
    }

    async fn apply_migration(&self, migration: &Migration) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        for statement in migration.sql_statements.iter().copied() {
            sqlx::query(statement).execute(&mut *tx).await.map_err(|e| {
                error!("Failed to execute migration statement: {}", e);
                e
            })?;
        }

        sqlx::query("INSERT INTO _migrations (version, name, checksum) VALUES (?, ?, ?)")
            .bind(migration.version)
            .bind(migration.name)
            .bind(migration.checksum)
            .execute(&mut *tx)
            .await?;

        tx.commit().await
    }
}

struct Migration {
    version: i64,
    name: &'static str,
    checksum: &'static str,
    sql_statements: &'static [&'static str],
}

fn migrations() -> Vec<Migration> {
    vec![Migration {
        version: 1,
        name: "create_documents_table",
        checksum: "documents_v1",
        sql_statements: &[
            r#"
            CREATE TABLE documents (
                id TEXT PRIMARY KEY,
                database_name TEXT NOT NULL,
                collection TEXT NOT NULL,
                body TEXT NOT NULL CHECK (json_valid(body)),
                inserted_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
            "CREATE INDEX idx_documents_collection ON documents(database_name, collection)",
        ],
    }]
}

pub async fn run_migrations(pool: SqlitePool) -> Result<(), sqlx::Error> {
    MigrationManager::new(pool).run_migrations().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let temp_file = NamedTempFile::new().unwrap();
        let database_url = format!("sqlite:{}", temp_file.path().display());
        let pool = SqlitePool::connect(&database_url).await.unwrap();

        run_migrations(pool.clone()).await.unwrap();
        run_migrations(pool.clone()).await.unwrap();

        let tables: Vec<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type='table'")
                .fetch_all(&pool)
                .await
                .unwrap();
        assert!(tables.contains(&"documents".to_string()));

        let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _migrations")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(applied, 1);
    }
}
