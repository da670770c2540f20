use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreateUserRequest, ListUsersQuery};
use crate::domain::models::{identity::EntityKind, user::User};
use crate::domain::services::prefix::role_prefix;
use std::sync::Arc;
use crate::error::AppError;
use tracing::{info, error};

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = payload.email.trim().to_lowercase();
    let full_name = payload.full_name.trim().to_string();
    if !email.contains('@') {
        return Err(AppError::Validation("A valid email is required".into()));
    }
    if full_name.is_empty() {
        return Err(AppError::Validation("Full name is required".into()));
    }

    let role = payload.role;
    let repo = &state.user_repo;
    let created = state.id_allocator
        .create_with_unique_id(role_prefix(role), EntityKind::User, |unique_id| {
            let user = User::new(unique_id, email.clone(), full_name.clone(), role);
            async move { repo.create(&user).await }
        })
        .await?;

    info!(user_id = %created.id, unique_id = ?created.unique_id, role = %created.role, "Created user");
    Ok(Json(created))
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListUsersQuery>,
) -> Result<impl IntoResponse, AppError> {
    let users = state.user_repo.list(query.role.map(|r| r.as_str())).await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_repo.find_by_id(&user_id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    match state.user_repo.delete(&user_id).await {
        Ok(_) => {
            info!("Deleted user {}", user_id);
            Ok(Json(serde_json::json!({"status": "deleted"})))
        },
        Err(e) => {
            error!("Failed to delete user {}: {:?}", user_id, e);
            Err(e)
        }
    }
}
