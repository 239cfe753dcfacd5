//! Document persistence keyed by id.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("document could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A single container of JSON documents with insert-or-replace semantics.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert the document, or fully replace the one already stored under `id`.
    async fn upsert(&self, id: &str, document: Value) -> Result<(), StoreError>;

    async fn get(&self, id: &str) -> Result<Option<Value>, StoreError>;

    /// Cheap connectivity check.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Serialize `document` and upsert it under `id`.
pub async fn upsert_item<T>(
    store: &dyn DocumentStore,
    id: &str,
    document: &T,
) -> Result<(), StoreError>
where
    T: Serialize + Sync,
{
    let value = serde_json::to_value(document)?;
    store.upsert(id, value).await
}
