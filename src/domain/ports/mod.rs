use crate::domain::models::{
    identity::EntityKind, user::User, property::Property, material::Material,
    payout::{Payout, Expense}, payment::Payment,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Existence check backing unique-id allocation. Only live rows are consulted.
#[async_trait]
pub trait UniqueIdStore: Send + Sync {
    async fn exists(&self, kind: EntityKind, unique_id: &str) -> Result<bool, AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_unique_id(&self, unique_id: &str) -> Result<Option<User>, AppError>;
    async fn list(&self, role: Option<&str>) -> Result<Vec<User>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn list_missing_unique_id(&self, limit: i64) -> Result<Vec<User>, AppError>;
    /// Writes `unique_id` only when the row has none yet. Returns whether a row changed.
    async fn set_unique_id(&self, id: &str, unique_id: &str) -> Result<bool, AppError>;
}

#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn create(&self, property: &Property) -> Result<Property, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Property>, AppError>;
    async fn list(&self, landlord_id: Option<&str>) -> Result<Vec<Property>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn list_missing_unique_id(&self, limit: i64) -> Result<Vec<Property>, AppError>;
    async fn set_unique_id(&self, id: &str, unique_id: &str) -> Result<bool, AppError>;
}

#[async_trait]
pub trait MaterialRepository: Send + Sync {
    async fn create(&self, material: &Material) -> Result<Material, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Material>, AppError>;
    async fn list(&self, property_id: Option<&str>) -> Result<Vec<Material>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn list_missing_unique_id(&self, limit: i64) -> Result<Vec<Material>, AppError>;
    async fn set_unique_id(&self, id: &str, unique_id: &str) -> Result<bool, AppError>;
}

#[async_trait]
pub trait PayoutRepository: Send + Sync {
    async fn create(&self, payout: &Payout) -> Result<Payout, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Payout>, AppError>;
    async fn list_by_landlord(&self, landlord_id: &str) -> Result<Vec<Payout>, AppError>;
    /// In one transaction: marks the payout approved, settles its period from the landlord's
    /// latest approved `period_end` (see `payout_period`), and claims the unassigned expenses
    /// inside it. Returns the updated payout, the claimed count and their total.
    async fn approve(&self, payout_id: &str, approved_at: DateTime<Utc>) -> Result<(Payout, u64, i64), AppError>;
}

#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    async fn create(&self, expense: &Expense) -> Result<Expense, AppError>;
    async fn list_by_landlord(&self, landlord_id: &str) -> Result<Vec<Expense>, AppError>;
    async fn list_by_payout(&self, payout_id: &str) -> Result<Vec<Expense>, AppError>;
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, payment: &Payment) -> Result<Payment, AppError>;
    async fn find_by_reference(&self, reference: &str) -> Result<Option<Payment>, AppError>;
    async fn list(&self) -> Result<Vec<Payment>, AppError>;
}
