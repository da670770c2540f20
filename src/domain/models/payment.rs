use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Payment {
    pub id: String,
    pub reference: String,
    pub user_id: Option<String>,
    pub property_id: Option<String>,
    pub amount: i64,
    pub currency: String,
    pub channel: Option<String>,
    pub status: String,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(reference: String, amount: i64, currency: String, status: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            reference,
            user_id: None,
            property_id: None,
            amount,
            currency,
            channel: None,
            status,
            paid_at: None,
            created_at: Utc::now(),
        }
    }
}
