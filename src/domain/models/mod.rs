pub mod identity;
pub mod material;
pub mod payment;
pub mod payout;
pub mod property;
pub mod user;
