use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use super::{DocumentStore, StoreError};

/// Documents stored as JSONB rows in the `documents` table, scoped by container.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
    container: String,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool, container: impl Into<String>) -> Self {
        Self {
            pool,
            container: container.into(),
        }
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn upsert(&self, id: &str, document: Value) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO documents (container, id, content, updated_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (container, id)
            DO UPDATE SET content = EXCLUDED.content, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&self.container)
        .bind(id)
        .bind(&document)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Value>, StoreError> {
        let content: Option<Value> =
            sqlx::query_scalar("SELECT content FROM documents WHERE container = $1 AND id = $2")
                .bind(&self.container)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(content)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
