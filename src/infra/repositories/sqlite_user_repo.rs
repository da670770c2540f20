use crate::domain::{models::user::User, ports::UserRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::error;

pub struct SqliteUserRepo {
    pool: SqlitePool,
}

impl SqliteUserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepo {
    async fn create(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, unique_id, email, full_name, role, created_at) VALUES (?, ?, ?, ?, ?, ?) RETURNING id, unique_id, email, full_name, role, created_at",
        )
            .bind(&user.id)
            .bind(&user.unique_id)
            .bind(&user.email)
            .bind(&user.full_name)
            .bind(&user.role)
            .bind(user.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, unique_id, email, full_name, role, created_at FROM users WHERE id = ?",
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_unique_id(&self, unique_id: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, unique_id, email, full_name, role, created_at FROM users WHERE unique_id = ?",
        )
            .bind(unique_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, role: Option<&str>) -> Result<Vec<User>, AppError> {
        match role {
            Some(role) => sqlx::query_as::<_, User>(
                "SELECT id, unique_id, email, full_name, role, created_at FROM users WHERE role = ? ORDER BY created_at ASC"
            )
                .bind(role)
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database),
            None => sqlx::query_as::<_, User>(
                "SELECT id, unique_id, email, full_name, role, created_at FROM users ORDER BY created_at ASC"
            )
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("SQLite User Deletion Failed: {:?}", e);
                AppError::Database(e)
            })?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".into()));
        }
        Ok(())
    }

    async fn list_missing_unique_id(&self, limit: i64) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, unique_id, email, full_name, role, created_at FROM users WHERE unique_id IS NULL ORDER BY created_at ASC LIMIT ?"
        )
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn set_unique_id(&self, id: &str, unique_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE users SET unique_id = ? WHERE id = ? AND unique_id IS NULL")
            .bind(unique_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
}
