pub mod backfill_service;
pub mod id_allocator;
pub mod payout_service;
pub mod prefix;
pub mod webhook;
