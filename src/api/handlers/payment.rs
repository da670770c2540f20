use axum::{body::Bytes, extract::State, http::HeaderMap, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::responses::WebhookAck;
use crate::api::extractors::admin::AdminKey;
use crate::domain::services::webhook::{verify_signature, WebhookEvent, SIGNATURE_HEADER};
use crate::error::AppError;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn paystack_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let signature = headers.get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    if !verify_signature(&state.config.paystack_secret_key, &body, signature) {
        warn!("Rejected webhook with invalid signature");
        return Err(AppError::Unauthorized);
    }

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("Malformed webhook payload: {}", e)))?;

    if !event.is_charge() {
        info!("Ignoring webhook event {}", event.event);
        return Ok(Json(WebhookAck::ignored()));
    }

    let charge = event.into_charge()
        .map_err(|e| AppError::Validation(format!("Malformed charge payload: {}", e)))?;

    if state.payment_repo.find_by_reference(&charge.reference).await?.is_some() {
        info!("Payment {} already recorded", charge.reference);
        return Ok(Json(WebhookAck::ignored()));
    }

    let payment = charge.into_payment();
    match state.payment_repo.create(&payment).await {
        Ok(created) => {
            info!(reference = %created.reference, amount = created.amount, "Recorded payment");
            Ok(Json(WebhookAck::recorded()))
        }
        // Gateway retried while the first delivery was still being stored.
        Err(e) if e.is_unique_violation() => Ok(Json(WebhookAck::ignored())),
        Err(e) => Err(e),
    }
}

pub async fn list_payments(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
) -> Result<impl IntoResponse, AppError> {
    let payments = state.payment_repo.list().await?;
    Ok(Json(payments))
}
