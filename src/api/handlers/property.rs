use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreatePropertyRequest, ListPropertiesQuery};
use crate::domain::models::{identity::EntityKind, property::Property, user::Role};
use crate::domain::services::prefix::property_prefix;
use std::sync::Arc;
use crate::error::AppError;
use tracing::info;

pub async fn create_property(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreatePropertyRequest>,
) -> Result<impl IntoResponse, AppError> {
    let title = payload.title.trim().to_string();
    let location = payload.location.trim().to_string();
    if title.is_empty() || location.is_empty() {
        return Err(AppError::Validation("Title and location are required".into()));
    }
    let rent_amount = payload.rent_amount.unwrap_or(0);
    if rent_amount < 0 {
        return Err(AppError::Validation("Rent amount cannot be negative".into()));
    }

    if let Some(landlord_id) = &payload.landlord_id {
        let landlord = state.user_repo.find_by_id(landlord_id).await?
            .ok_or(AppError::NotFound("Landlord not found".into()))?;
        if landlord.role()? != Role::Landlord {
            return Err(AppError::Validation(format!("User {} is not a landlord", landlord_id)));
        }
    }

    let prefix = property_prefix(&location);
    let repo = &state.property_repo;
    let created = state.id_allocator
        .create_with_unique_id(&prefix, EntityKind::Property, |unique_id| {
            let property = Property::new(unique_id, payload.landlord_id.clone(), title.clone(), location.clone(), rent_amount);
            async move { repo.create(&property).await }
        })
        .await?;

    info!(property_id = %created.id, unique_id = ?created.unique_id, "Created property");
    Ok(Json(created))
}

pub async fn list_properties(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListPropertiesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let properties = state.property_repo.list(query.landlord_id.as_deref()).await?;
    Ok(Json(properties))
}

pub async fn get_property(
    State(state): State<Arc<AppState>>,
    Path(property_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let property = state.property_repo.find_by_id(&property_id).await?
        .ok_or(AppError::NotFound("Property not found".into()))?;
    Ok(Json(property))
}

pub async fn delete_property(
    State(state): State<Arc<AppState>>,
    Path(property_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.property_repo.delete(&property_id).await?;
    info!("Deleted property: {}", property_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
