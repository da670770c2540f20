use apm_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::factory::{assemble_state, run_sqlite_migrations, sqlite_stores},
    domain::services::webhook::{sign, SIGNATURE_HEADER},
    api::extractors::admin::ADMIN_KEY_HEADER,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, header, StatusCode},
    Router,
};
use std::str::FromStr;
use tower::ServiceExt;
use serde_json::Value;

pub const ADMIN_KEY: &str = "test-admin-key";
pub const PAYSTACK_SECRET: &str = "sk_test_secret";

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        Self::with_id_max_retries(10).await
    }

    pub async fn with_id_max_retries(id_max_retries: u32) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        run_sqlite_migrations(&pool).await.expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            id_max_retries,
            backfill_max_retries: 20,
            paystack_secret_key: PAYSTACK_SECRET.to_string(),
            admin_api_key: ADMIN_KEY.to_string(),
        };

        let state = Arc::new(assemble_state(&config, sqlite_stores(pool.clone())));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::builder().method("POST").uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())).unwrap()
        ).await
    }

    pub async fn admin_post(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder().method("POST").uri(uri)
                .header(ADMIN_KEY_HEADER, ADMIN_KEY)
                .body(Body::empty()).unwrap()
        ).await
    }

    pub async fn admin_get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder().method("GET").uri(uri)
                .header(ADMIN_KEY_HEADER, ADMIN_KEY)
                .body(Body::empty()).unwrap()
        ).await
    }

    pub async fn webhook(&self, payload: &Value, secret: &str) -> (StatusCode, Value) {
        let raw = payload.to_string();
        let signature = sign(secret, raw.as_bytes()).unwrap();
        self.send(
            Request::builder().method("POST").uri("/api/v1/webhooks/paystack")
                .header(header::CONTENT_TYPE, "application/json")
                .header(SIGNATURE_HEADER, signature)
                .body(Body::from(raw)).unwrap()
        ).await
    }

    pub async fn create_user(&self, email: &str, role: &str) -> Value {
        let (status, body) = self.post_json(
            "/api/v1/users",
            serde_json::json!({ "email": email, "full_name": "Test Person", "role": role }),
        ).await;
        assert_eq!(status, StatusCode::OK, "create_user failed: {}", body);
        body
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

#[allow(dead_code)]
pub fn has_prefix_and_four_digits(id: &str, prefix: &str) -> bool {
    id.len() == prefix.len() + 4
        && id.starts_with(prefix)
        && id[prefix.len()..].chars().all(|c| c.is_ascii_digit())
}
