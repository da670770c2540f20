use crate::domain::{models::identity::EntityKind, ports::UniqueIdStore};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresUniqueIdStore {
    pool: PgPool,
}

impl PostgresUniqueIdStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UniqueIdStore for PostgresUniqueIdStore {
    async fn exists(&self, kind: EntityKind, unique_id: &str) -> Result<bool, AppError> {
        // Table names come from the closed EntityKind set, never from input.
        let sql = format!("SELECT COUNT(*) FROM {} WHERE unique_id = $1", kind.table());
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(unique_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(count > 0)
    }
}
