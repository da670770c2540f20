use axum::{extract::{State, Path}, response::IntoResponse, Json};
use chrono::Utc;
use crate::state::AppState;
use crate::api::dtos::requests::{CreateExpenseRequest, RequestPayoutRequest};
use crate::api::extractors::admin::AdminKey;
use crate::domain::models::{payout::Expense, user::Role};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateExpenseRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.amount <= 0 {
        return Err(AppError::Validation("Expense amount must be positive".into()));
    }
    let description = payload.description.trim().to_string();
    if description.is_empty() {
        return Err(AppError::Validation("Expense description is required".into()));
    }

    let landlord = state.user_repo.find_by_id(&payload.landlord_id).await?
        .ok_or(AppError::NotFound("Landlord not found".into()))?;
    if landlord.role()? != Role::Landlord {
        return Err(AppError::Validation(format!("User {} is not a landlord", landlord.id)));
    }

    let expense = Expense::new(landlord.id, payload.property_id, description, payload.amount);
    let created = state.expense_repo.create(&expense).await?;
    info!("Recorded expense {} of {} for landlord {}", created.id, created.amount, created.landlord_id);
    Ok(Json(created))
}

pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Path(landlord_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let expenses = state.expense_repo.list_by_landlord(&landlord_id).await?;
    Ok(Json(expenses))
}

pub async fn request_payout(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RequestPayoutRequest>,
) -> Result<impl IntoResponse, AppError> {
    let payout = state.payout_service.request(&payload.landlord_id, payload.amount).await?;
    Ok(Json(payout))
}

pub async fn list_payouts(
    State(state): State<Arc<AppState>>,
    Path(landlord_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let payouts = state.payout_repo.list_by_landlord(&landlord_id).await?;
    Ok(Json(payouts))
}

pub async fn approve_payout(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Path(payout_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let approval = state.payout_service.approve(&payout_id, Utc::now()).await?;
    Ok(Json(approval))
}
