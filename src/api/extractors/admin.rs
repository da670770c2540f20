use axum::{
    extract::{FromRequestParts, FromRef},
    http::{request::Parts, StatusCode},
};
use crate::state::AppState;
use std::sync::Arc;
use tracing::warn;

pub const ADMIN_KEY_HEADER: &str = "X-Admin-Key";

/// Operator-only routes. The caller must present the configured admin key.
pub struct AdminKey;

impl<S> FromRequestParts<S> for AdminKey
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let presented = parts.headers.get(ADMIN_KEY_HEADER)
            .ok_or(StatusCode::UNAUTHORIZED)?
            .to_str()
            .map_err(|_| StatusCode::UNAUTHORIZED)?;

        if app_state.config.admin_api_key.is_empty() || presented != app_state.config.admin_api_key {
            warn!("Rejected admin request to {}", parts.uri.path());
            return Err(StatusCode::FORBIDDEN);
        }

        Ok(AdminKey)
    }
}
