use async_trait::async_trait;
use bson::oid::ObjectId;
use serde_json::{Map, Value};
use sqlx::{Row, SqlitePool};

use crate::persistence::{Document, PersistenceResult};

/// A schemaless store of JSON documents grouped into named collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts one document and returns its generated id.
    async fn insert_one(&self, collection: &str, body: Map<String, Value>) -> PersistenceResult<String>;

    /// Returns up to `limit` documents of `collection`. No sort key is applied.
    async fn find(&self, collection: &str, limit: i64) -> PersistenceResult<Vec<Document>>;

    async fn collection_names(&self) -> PersistenceResult<Vec<String>>;

    /// Round-trips a trivial command to prove the store answers.
    async fn ping(&self) -> PersistenceResult<()>;
}

/// Documents of one logical database, kept in the `documents` table.
#[derive(Clone)]
pub struct SqliteDocumentStore {
    pool: SqlitePool,
    database: String,
}

impl SqliteDocumentStore {
    pub fn new(pool: SqlitePool, database: impl Into<String>) -> Self {
        Self {
            pool,
            database: database.into(),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

/// `0` reads everything and negative limits count from their magnitude.
fn sql_limit(limit: i64) -> i64 {
    match limit {
        0 => -1,
        n => n.saturating_abs(),
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn insert_one(&self, collection: &str, body: Map<String, Value>) -> PersistenceResult<String> {
        let id = ObjectId::new().to_hex();
        let body = serde_json::to_string(&body)?;

        sqlx::query(
            r#"
            INSERT INTO documents (id, database_name, collection, body)
            VALUES (?, ?, ?, ?)
        "#,
        )
        .bind(&id)
        .bind(&self.database)
        .bind(collection)
        .bind(body)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn find(&self, collection: &str, limit: i64) -> PersistenceResult<Vec<Document>> {
        let rows = sqlx::query(
            r#"
            SELECT id, body
            FROM documents
            WHERE database_name = ? AND collection = ?
            LIMIT ?
        "#,
        )
        .bind(&self.database)
        .bind(collection)
        .bind(sql_limit(limit))
        .fetch_all(&self.pool)
        .await?;

        let mut documents = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row.try_get("id")?;
            let body: String = row.try_get("body")?;
            let fields: Map<String, Value> = serde_json::from_str(&body)?;
            documents.push(Document::new(id, fields));
        }

        Ok(documents)
    }

    async fn collection_names(&self) -> PersistenceResult<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT collection
            FROM documents
            WHERE database_name = ?
            ORDER BY collection
        "#,
        )
        .bind(&self.database)
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }

    async fn ping(&self) -> PersistenceResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::run_migrations;
    use serde_json::json;
    use tempfile::NamedTempFile;

    async fn setup_store(database: &str) -> (SqliteDocumentStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let database_url = format!("sqlite:{}", temp_file.path().display());

        let pool = SqlitePool::connect(&database_url).await.unwrap();
        run_migrations(pool.clone()).await.unwrap();

        (SqliteDocumentStore::new(pool, database), temp_file)
    }

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_sql_limit() {
        assert_eq!(sql_limit(20), 20);
        assert_eq!(sql_limit(0), -1);
        assert_eq!(sql_limit(-3), 3);
        assert_eq!(sql_limit(i64::MIN), i64::MAX);
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let (store, _file) = setup_store("clinic").await;

        let id = store
            .insert_one("appointment", body(json!({ "name": "Jo", "pet_type": "Dog" })))
            .await
            .unwrap();
        assert_eq!(id.len(), 24);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));

        let docs = store.find("appointment", 20).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, id);
        assert_eq!(docs[0].text("pet_type"), Some("Dog"));

        assert!(store.find("contactmessage", 20).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_respects_limit() {
        let (store, _file) = setup_store("clinic").await;

        for i in 0..5 {
            store
                .insert_one("appointment", body(json!({ "n": i })))
                .await
                .unwrap();
        }

        assert_eq!(store.find("appointment", 2).await.unwrap().len(), 2);
        assert_eq!(store.find("appointment", 0).await.unwrap().len(), 5);
        assert_eq!(store.find("appointment", -4).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_logical_databases_are_isolated() {
        let (store, _file) = setup_store("clinic").await;
        let other = SqliteDocumentStore::new(store.pool().clone(), "staging");

        store
            .insert_one("appointment", body(json!({ "name": "Jo" })))
            .await
            .unwrap();
        other
            .insert_one("contactmessage", body(json!({ "name": "Sam" })))
            .await
            .unwrap();

        assert_eq!(store.collection_names().await.unwrap(), vec!["appointment"]);
        assert_eq!(other.collection_names().await.unwrap(), vec!["contactmessage"]);
        assert!(other.find("appointment", 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ping() {
        let (store, _file) = setup_store("clinic").await;
        store.ping().await.unwrap();

        store.pool().close().await;
        let err = store.ping().await.unwrap_err();
        assert!(matches!(err, crate::persistence::PersistenceError::Database(_)));
    }

    #[tokio::test]
    async fn test_closed_pool_is_a_database_error() {
        let (store, _file) = setup_store("clinic").await;
        store.pool().close().await;

        let err = store
            .insert_one("appointment", body(json!({ "name": "Jo" })))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::persistence::PersistenceError::Database(_)));
    }
}
