use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const PAYOUT_PENDING: &str = "PENDING";
pub const PAYOUT_APPROVED: &str = "APPROVED";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Payout {
    pub id: String,
    pub landlord_id: String,
    pub amount: i64,
    pub status: String,
    pub period_start: Option<DateTime<Utc>>,
    pub period_end: Option<DateTime<Utc>>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Payout {
    pub fn new(landlord_id: String, amount: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            landlord_id,
            amount,
            status: PAYOUT_PENDING.to_string(),
            period_start: None,
            period_end: None,
            approved_at: None,
            created_at: Utc::now(),
        }
    }
}

/// Half-open window `[start, end)` of expenses settled by one payout.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PayoutPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone)]
pub struct PayoutApproval {
    pub payout: Payout,
    pub reassigned_expenses: u64,
    pub expense_total: i64,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Expense {
    pub id: String,
    pub landlord_id: String,
    pub property_id: Option<String>,
    pub description: String,
    pub amount: i64,
    pub payout_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(landlord_id: String, property_id: Option<String>, description: String, amount: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            landlord_id,
            property_id,
            description,
            amount,
            payout_id: None,
            created_at: Utc::now(),
        }
    }
}
