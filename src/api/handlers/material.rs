use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreateMaterialRequest, ListMaterialsQuery};
use crate::domain::models::{identity::EntityKind, material::Material};
use crate::domain::services::prefix::MATERIAL_PREFIX;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_material(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateMaterialRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("Material name is required".into()));
    }
    let quantity = payload.quantity.unwrap_or(0);
    if quantity < 0 {
        return Err(AppError::Validation("Quantity cannot be negative".into()));
    }
    if let Some(property_id) = &payload.property_id {
        state.property_repo.find_by_id(property_id).await?
            .ok_or(AppError::NotFound("Property not found".into()))?;
    }

    let repo = &state.material_repo;
    let created = state.id_allocator
        .create_with_unique_id(MATERIAL_PREFIX, EntityKind::Material, |unique_id| {
            let material = Material::new(unique_id, payload.property_id.clone(), name.clone(), quantity);
            async move { repo.create(&material).await }
        })
        .await?;

    info!(material_id = %created.id, unique_id = ?created.unique_id, "Created material");
    Ok(Json(created))
}

pub async fn list_materials(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListMaterialsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let materials = state.material_repo.list(query.property_id.as_deref()).await?;
    Ok(Json(materials))
}

pub async fn delete_material(
    State(state): State<Arc<AppState>>,
    Path(material_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.material_repo.delete(&material_id).await?;
    info!("Deleted material: {}", material_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
