use crate::domain::{models::material::Material, ports::MaterialRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresMaterialRepo {
    pool: PgPool,
}

impl PostgresMaterialRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MaterialRepository for PostgresMaterialRepo {
    async fn create(&self, material: &Material) -> Result<Material, AppError> {
        sqlx::query_as::<_, Material>(
            "INSERT INTO materials (id, unique_id, property_id, name, quantity, created_at) VALUES ($1, $2, $3, $4, $5, $6) RETURNING *"
        )
            .bind(&material.id)
            .bind(&material.unique_id)
            .bind(&material.property_id)
            .bind(&material.name)
            .bind(material.quantity)
            .bind(material.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Material>, AppError> {
        sqlx::query_as::<_, Material>("SELECT * FROM materials WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, property_id: Option<&str>) -> Result<Vec<Material>, AppError> {
        match property_id {
            Some(property_id) => sqlx::query_as::<_, Material>("SELECT * FROM materials WHERE property_id = $1 ORDER BY created_at ASC")
                .bind(property_id)
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database),
            None => sqlx::query_as::<_, Material>("SELECT * FROM materials ORDER BY created_at ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM materials WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Material not found".into()));
        }
        Ok(())
    }

    async fn list_missing_unique_id(&self, limit: i64) -> Result<Vec<Material>, AppError> {
        sqlx::query_as::<_, Material>("SELECT * FROM materials WHERE unique_id IS NULL ORDER BY created_at ASC LIMIT $1")
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn set_unique_id(&self, id: &str, unique_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE materials SET unique_id = $1 WHERE id = $2 AND unique_id IS NULL")
            .bind(unique_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
}
