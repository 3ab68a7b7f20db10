//! Persistence adapter between validated records and the document store

use crate::database::DocumentStore;
use crate::models::datetime::{format_date_time, parse_date_time};
use chrono::{NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Database not available. Check DATABASE_URL and DATABASE_NAME environment variables")]
    StoreUnavailable,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Document error: {0}")]
    Document(#[from] serde_json::Error),
}

impl PersistenceError {
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, PersistenceError::StoreUnavailable)
    }
}

pub type PersistenceResult<T> = std::result::Result<T, PersistenceError>;

/// A stored document: the store-assigned id plus its schemaless fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn date_time(&self, key: &str) -> Option<NaiveDateTime> {
        self.text(key).and_then(parse_date_time)
    }
}

/// Handle injected into every route. Without a store every operation fails
/// with [`PersistenceError::StoreUnavailable`].
#[derive(Clone)]
pub struct Persistence {
    store: Option<Arc<dyn DocumentStore>>,
}

impl Persistence {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store: Some(store) }
    }

    pub fn with_store<S>(store: S) -> Self
    where
        S: DocumentStore + 'static,
    {
        Self::new(Arc::new(store))
    }

    pub fn unavailable() -> Self {
        Self { store: None }
    }

    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    fn store(&self) -> PersistenceResult<&Arc<dyn DocumentStore>> {
        self.store.as_ref().ok_or(PersistenceError::StoreUnavailable)
    }

    /// Serializes `record`, stamps `created_at`/`updated_at` and inserts it.
    /// Returns the store-assigned id.
    pub async fn create<R>(&self, collection: &str, record: &R) -> PersistenceResult<String>
    where
        R: Serialize + ?Sized,
    {
        let store = self.store()?;

        let mut body = match serde_json::to_value(record)? {
            Value::Object(body) => body,
            _ => {
                return Err(PersistenceError::Document(serde::ser::Error::custom(
                    "record must serialize to a JSON object",
                )))
            }
        };

        let now = Value::String(format_date_time(&Utc::now().naive_utc()));
        body.insert("created_at".to_string(), now.clone());
        body.insert("updated_at".to_string(), now);

        let id = store.insert_one(collection, body).await.map_err(|e| {
            error!("Insert into '{}' failed: {}", collection, e);
            e
        })?;

        debug!("Inserted document {} into '{}'", id, collection);
        Ok(id)
    }

    /// Up to `limit` documents in the store's natural order.
    pub async fn read_many(&self, collection: &str, limit: i64) -> PersistenceResult<Vec<Document>> {
        let store = self.store()?;

        store.find(collection, limit).await.map_err(|e| {
            error!("Read from '{}' failed: {}", collection, e);
            e
        })
    }

    pub async fn collection_names(&self) -> PersistenceResult<Vec<String>> {
        self.store()?.collection_names().await
    }

    pub async fn ping(&self) -> PersistenceResult<()> {
        self.store()?.ping().await
    }
}
