use crate::domain::{models::payout::Expense, ports::ExpenseRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteExpenseRepo {
    pool: SqlitePool,
}

impl SqliteExpenseRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExpenseRepository for SqliteExpenseRepo {
    async fn create(&self, expense: &Expense) -> Result<Expense, AppError> {
        sqlx::query_as::<_, Expense>(
            "INSERT INTO expenses (id, landlord_id, property_id, description, amount, payout_id, created_at) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&expense.id).bind(&expense.landlord_id).bind(&expense.property_id)
            .bind(&expense.description).bind(expense.amount).bind(&expense.payout_id).bind(expense.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_landlord(&self, landlord_id: &str) -> Result<Vec<Expense>, AppError> {
        sqlx::query_as::<_, Expense>("SELECT * FROM expenses WHERE landlord_id = ? ORDER BY created_at ASC").bind(landlord_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_payout(&self, payout_id: &str) -> Result<Vec<Expense>, AppError> {
        sqlx::query_as::<_, Expense>("SELECT * FROM expenses WHERE payout_id = ? ORDER BY created_at ASC").bind(payout_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
