use crate::domain::{models::payout::Payout, ports::PayoutRepository, services::payout_service::payout_period};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

pub struct SqlitePayoutRepo {
    pool: SqlitePool,
}

impl SqlitePayoutRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PayoutRepository for SqlitePayoutRepo {
    async fn create(&self, payout: &Payout) -> Result<Payout, AppError> {
        sqlx::query_as::<_, Payout>(
            "INSERT INTO payouts (id, landlord_id, amount, status, period_start, period_end, approved_at, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&payout.id).bind(&payout.landlord_id).bind(payout.amount).bind(&payout.status)
            .bind(payout.period_start).bind(payout.period_end).bind(payout.approved_at).bind(payout.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Payout>, AppError> {
        sqlx::query_as::<_, Payout>("SELECT * FROM payouts WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_landlord(&self, landlord_id: &str) -> Result<Vec<Payout>, AppError> {
        sqlx::query_as::<_, Payout>("SELECT * FROM payouts WHERE landlord_id = ? ORDER BY created_at ASC").bind(landlord_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn approve(&self, payout_id: &str, approved_at: DateTime<Utc>) -> Result<(Payout, u64, i64), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let claimed = sqlx::query_as::<_, Payout>(
            "UPDATE payouts SET status = 'APPROVED', approved_at = ? WHERE id = ? AND status = 'PENDING' RETURNING *"
        )
            .bind(approved_at).bind(payout_id)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?
            .ok_or(AppError::Conflict("Payout is no longer pending".into()))?;

        let previous_end = sqlx::query_scalar::<_, Option<DateTime<Utc>>>(
            "SELECT period_end FROM payouts WHERE landlord_id = ? AND id <> ? AND status = 'APPROVED' AND period_end IS NOT NULL ORDER BY period_end DESC LIMIT 1"
        )
            .bind(&claimed.landlord_id).bind(&claimed.id)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?
            .flatten();
        let period = payout_period(previous_end, approved_at)?;

        let approved = sqlx::query_as::<_, Payout>(
            "UPDATE payouts SET period_start = ?, period_end = ? WHERE id = ? RETURNING *"
        )
            .bind(period.start).bind(period.end).bind(&claimed.id)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        let reassigned = sqlx::query(
            "UPDATE expenses SET payout_id = ? WHERE landlord_id = ? AND payout_id IS NULL AND created_at >= ? AND created_at < ?"
        )
            .bind(&approved.id).bind(&approved.landlord_id).bind(period.start).bind(period.end)
            .execute(&mut *tx).await.map_err(AppError::Database)?
            .rows_affected();

        let total: i64 = sqlx::query_scalar("SELECT CAST(COALESCE(SUM(amount), 0) AS BIGINT) FROM expenses WHERE payout_id = ?")
            .bind(&approved.id)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok((approved, reassigned, total))
    }
}
