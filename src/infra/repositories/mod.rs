pub mod sqlite_unique_id_store;
pub mod sqlite_user_repo;
pub mod sqlite_property_repo;
pub mod sqlite_material_repo;
pub mod sqlite_payout_repo;
pub mod sqlite_expense_repo;
pub mod sqlite_payment_repo;

pub mod postgres_unique_id_store;
pub mod postgres_user_repo;
pub mod postgres_property_repo;
pub mod postgres_material_repo;
pub mod postgres_payout_repo;
pub mod postgres_expense_repo;
pub mod postgres_payment_repo;
