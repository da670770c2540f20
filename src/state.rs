use std::sync::Arc;
use crate::domain::ports::{
    UserRepository, PropertyRepository, MaterialRepository,
    PayoutRepository, ExpenseRepository, PaymentRepository,
};
use crate::domain::services::{
    backfill_service::BackfillService, id_allocator::IdAllocator, payout_service::PayoutService,
};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub property_repo: Arc<dyn PropertyRepository>,
    pub material_repo: Arc<dyn MaterialRepository>,
    pub payout_repo: Arc<dyn PayoutRepository>,
    pub expense_repo: Arc<dyn ExpenseRepository>,
    pub payment_repo: Arc<dyn PaymentRepository>,
    pub id_allocator: Arc<IdAllocator>,
    pub payout_service: Arc<PayoutService>,
    pub backfill_service: Arc<BackfillService>,
}
