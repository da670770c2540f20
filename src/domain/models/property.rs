use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Property {
    pub id: String,
    pub unique_id: Option<String>,
    pub landlord_id: Option<String>,
    pub title: String,
    pub location: String,
    pub rent_amount: i64,
    pub created_at: DateTime<Utc>,
}

impl Property {
    pub fn new(unique_id: String, landlord_id: Option<String>, title: String, location: String, rent_amount: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            unique_id: Some(unique_id),
            landlord_id,
            title,
            location,
            rent_amount,
            created_at: Utc::now(),
        }
    }
}
