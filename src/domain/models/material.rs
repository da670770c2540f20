use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Material {
    pub id: String,
    pub unique_id: Option<String>,
    pub property_id: Option<String>,
    pub name: String,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
}

impl Material {
    pub fn new(unique_id: String, property_id: Option<String>, name: String, quantity: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            unique_id: Some(unique_id),
            property_id,
            name,
            quantity,
            created_at: Utc::now(),
        }
    }
}
