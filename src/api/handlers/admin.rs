use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::admin::AdminKey;
use crate::domain::models::identity::EntityKind;
use crate::error::AppError;
use std::sync::Arc;

pub async fn run_backfill(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Path(kind): Path<EntityKind>,
) -> Result<impl IntoResponse, AppError> {
    let report = state.backfill_service.run(kind).await?;
    Ok(Json(report))
}
