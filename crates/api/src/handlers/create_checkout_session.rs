use axum::extract::{Json, State};
use std::sync::Arc;
use tracing::error;
use validator::Validate;

use tourpay_core::services::checkout_service::CheckoutService;
use tourpay_core::AppState;
use tourpay_primitives::error::{ApiError, ApiErrorResponse};
use tourpay_primitives::models::dtos::checkout_dto::{CheckoutRequest, CheckoutResponse};

#[utoipa::path(
    post,
    path = "/create-checkout-session",
    tag = "Checkout",
    summary = "Create a hosted checkout session for a tour purchase",
    description = "Validates the purchase request and asks the payment provider for a hosted \
                   checkout session priced at `round(price * 100)` minor units. The browser \
                   should redirect to the returned `url`; the provider reports the outcome \
                   asynchronously through the webhook endpoint. \
                   `tourId`, `tourName` and a positive `price` are required; `currency` \
                   defaults to USD. Provider failures surface as 500 with a generic message.",
    operation_id = "createCheckoutSession",
    request_body = CheckoutRequest,
    responses(
        ( status = 200, description = "Checkout session created", body = CheckoutResponse),
        ( status = 400, description = "Missing required fields or unsupported currency", body = ApiErrorResponse),
        ( status = 405, description = "Method not allowed", body = ApiErrorResponse),
        ( status = 500, description = "Payment provider error", body = ApiErrorResponse),
    ),
    security(()),
)]
pub async fn create_checkout_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    req.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::Validation(e)
    })?;

    let purchase = req.into_purchase()?;

    let response = CheckoutService::create_session(&state, purchase).await?;

    Ok(Json(response))
}
