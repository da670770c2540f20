use std::sync::Arc;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::models::payout::{Payout, PayoutApproval, PayoutPeriod, PAYOUT_PENDING};
use crate::domain::models::user::Role;
use crate::domain::ports::{PayoutRepository, UserRepository};
use crate::error::AppError;

/// Window settled by the next payout: from the previous approved payout's end
/// (or the Unix epoch for a landlord's first payout) up to `now`, half-open.
pub fn payout_period(previous_end: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Result<PayoutPeriod, AppError> {
    let start = previous_end.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
    if start >= now {
        return Err(AppError::Conflict(format!(
            "Payout period is empty: previous payout ends at {}",
            start.to_rfc3339()
        )));
    }
    Ok(PayoutPeriod { start, end: now })
}

pub struct PayoutService {
    payouts: Arc<dyn PayoutRepository>,
    users: Arc<dyn UserRepository>,
}

impl PayoutService {
    pub fn new(payouts: Arc<dyn PayoutRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { payouts, users }
    }

    pub async fn request(&self, landlord_id: &str, amount: i64) -> Result<Payout, AppError> {
        if amount <= 0 {
            return Err(AppError::Validation("Payout amount must be positive".into()));
        }

        let landlord = self.users.find_by_id(landlord_id).await?
            .ok_or(AppError::NotFound("Landlord not found".into()))?;
        if landlord.role()? != Role::Landlord {
            return Err(AppError::Validation(format!("User {} is not a landlord", landlord_id)));
        }

        let created = self.payouts.create(&Payout::new(landlord.id, amount)).await?;
        info!(payout_id = %created.id, landlord_id = %created.landlord_id, amount, "Payout requested");
        Ok(created)
    }

    pub async fn approve(&self, payout_id: &str, now: DateTime<Utc>) -> Result<PayoutApproval, AppError> {
        let payout = self.payouts.find_by_id(payout_id).await?
            .ok_or(AppError::NotFound("Payout not found".into()))?;

        if payout.status != PAYOUT_PENDING {
            return Err(AppError::Conflict(format!("Payout {} is already {}", payout.id, payout.status)));
        }

        let (approved, reassigned_expenses, expense_total) = self.payouts.approve(&payout.id, now).await?;

        info!(
            payout_id = %approved.id,
            landlord_id = %approved.landlord_id,
            period_start = ?approved.period_start,
            period_end = ?approved.period_end,
            reassigned_expenses,
            expense_total,
            "Payout approved"
        );

        Ok(PayoutApproval {
            payout: approved,
            reassigned_expenses,
            expense_total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_first_payout_starts_at_epoch() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let period = payout_period(None, now).unwrap();
        assert_eq!(period.start.timestamp(), 0);
        assert_eq!(period.end, now);
    }

    #[test]
    fn test_next_payout_starts_at_previous_end() {
        let previous = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        let now = previous + Duration::days(28);
        let period = payout_period(Some(previous), now).unwrap();
        assert_eq!(period, PayoutPeriod { start: previous, end: now });
    }

    #[test]
    fn test_empty_or_inverted_window_is_a_conflict() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        assert!(matches!(payout_period(Some(now), now), Err(AppError::Conflict(_))));
        assert!(matches!(payout_period(Some(now + Duration::seconds(1)), now), Err(AppError::Conflict(_))));
    }
}
