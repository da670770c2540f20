pub mod admin;
pub mod health;
pub mod material;
pub mod payment;
pub mod payout;
pub mod property;
pub mod user;
