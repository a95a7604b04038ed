use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use tourpay_core::AppState;
use tourpay_primitives::models::dtos::health_dto::HealthStatus;

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    summary = "Health check endpoint",
    operation_id = "healthCheck",
    responses(
        ( status = 200, description = "Service is healthy and operational", body = HealthStatus),
    ),
    security(()),
)]
pub async fn health_check(State(_state): State<Arc<AppState>>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: StatusCode::OK.to_string(),
        message: "API is healthy".to_string(),
    })
}
