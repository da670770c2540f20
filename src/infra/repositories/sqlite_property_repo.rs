use crate::domain::{models::property::Property, ports::PropertyRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqlitePropertyRepo {
    pool: SqlitePool,
}

impl SqlitePropertyRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PropertyRepository for SqlitePropertyRepo {
    async fn create(&self, property: &Property) -> Result<Property, AppError> {
        sqlx::query_as::<_, Property>(
            "INSERT INTO properties (id, unique_id, landlord_id, title, location, rent_amount, created_at) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&property.id).bind(&property.unique_id).bind(&property.landlord_id)
            .bind(&property.title).bind(&property.location).bind(property.rent_amount)
            .bind(property.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Property>, AppError> {
        sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self, landlord_id: Option<&str>) -> Result<Vec<Property>, AppError> {
        match landlord_id {
            Some(landlord_id) => sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE landlord_id = ? ORDER BY created_at ASC").bind(landlord_id).fetch_all(&self.pool).await.map_err(AppError::Database),
            None => sqlx::query_as::<_, Property>("SELECT * FROM properties ORDER BY created_at ASC").fetch_all(&self.pool).await.map_err(AppError::Database),
        }
    }
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM properties WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Property not found".into())); }
        Ok(())
    }
    async fn list_missing_unique_id(&self, limit: i64) -> Result<Vec<Property>, AppError> {
        sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE unique_id IS NULL ORDER BY created_at ASC LIMIT ?").bind(limit).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn set_unique_id(&self, id: &str, unique_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE properties SET unique_id = ? WHERE id = ? AND unique_id IS NULL").bind(unique_id).bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
}
