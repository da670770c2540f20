use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

// 2067 = SQLite UNIQUE constraint, 1555 = SQLite PRIMARY KEY constraint
// 23505 = PostgreSQL unique_violation
const UNIQUE_VIOLATION_CODES: [&str; 3] = ["2067", "1555", "23505"];

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Could not allocate a unique id for prefix {prefix} after {attempts} attempts")]
    ExhaustedRetries { prefix: String, attempts: u32 },
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Internal server error")]
    Internal,
    #[error("Internal server error: {0}")]
    InternalWithMsg(String),
}

impl AppError {
    /// True when the store rejected a write because of a uniqueness constraint.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            AppError::Database(e) => match e.as_database_error() {
                Some(db_err) => {
                    if db_err.is_unique_violation() {
                        return true;
                    }
                    let code = db_err.code().unwrap_or_default();
                    UNIQUE_VIOLATION_CODES.contains(&&*code)
                }
                None => false,
            },
            _ => false,
        }
    }

    /// Unique violation on a specific column. PostgreSQL reports the constraint
    /// name (`users_unique_id_key`), SQLite only the message
    /// (`UNIQUE constraint failed: users.unique_id`).
    pub fn is_unique_violation_on(&self, column: &str) -> bool {
        if !self.is_unique_violation() {
            return false;
        }
        match self {
            AppError::Database(e) => match e.as_database_error() {
                Some(db_err) => {
                    db_err.constraint().is_some_and(|c| c.contains(column))
                        || db_err.message().contains(column)
                }
                None => false,
            },
            _ => false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_unique_violation() {
            return (
                StatusCode::CONFLICT,
                Json(json!({ "error": "Resource already exists (duplicate entry)" }))
            ).into_response();
        }

        let (status, message) = match &self {
            AppError::Database(e) => {
                error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::ExhaustedRetries { prefix, attempts } => {
                error!(prefix = %prefix, attempts = *attempts, "Unique id allocation exhausted");
                (StatusCode::SERVICE_UNAVAILABLE, format!("Could not allocate a unique id for prefix {}", prefix))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string()),
            AppError::InternalWithMsg(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
