use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, user, property, material, payout, payment, admin};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Accounts
        .route("/api/v1/users", post(user::create_user).get(user::list_users))
        .route("/api/v1/users/{user_id}", get(user::get_user).delete(user::delete_user))

        // Listings
        .route("/api/v1/properties", post(property::create_property).get(property::list_properties))
        .route("/api/v1/properties/{property_id}", get(property::get_property).delete(property::delete_property))
        .route("/api/v1/materials", post(material::create_material).get(material::list_materials))
        .route("/api/v1/materials/{material_id}", delete(material::delete_material))

        // Expenses & Payouts
        .route("/api/v1/expenses", post(payout::create_expense))
        .route("/api/v1/landlords/{landlord_id}/expenses", get(payout::list_expenses))
        .route("/api/v1/payouts", post(payout::request_payout))
        .route("/api/v1/landlords/{landlord_id}/payouts", get(payout::list_payouts))
        .route("/api/v1/payouts/{payout_id}/approve", post(payout::approve_payout))

        // Payments
        .route("/api/v1/webhooks/paystack", post(payment::paystack_webhook))
        .route("/api/v1/payments", get(payment::list_payments))

        // Operator
        .route("/api/v1/admin/backfill/{kind}", post(admin::run_backfill))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
