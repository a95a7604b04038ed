use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use http::HeaderMap;
use std::sync::Arc;
use tracing::info;

use tourpay_core::services::webhook_service::{WebhookOutcome, WebhookService};
use tourpay_core::AppState;
use tourpay_primitives::error::{ApiError, ApiErrorResponse};
use tourpay_primitives::models::dtos::webhook_dto::WebhookAck;

#[utoipa::path(
    post,
    path = "/webhook",
    tag = "Webhooks",
    summary = "Receive and process Stripe webhook events",
    description = "Public endpoint receiving asynchronous event notifications from Stripe \
                   (`checkout.session.completed`, `payment_intent.succeeded`, \
                   `payment_intent.payment_failed`, and others). The request signature in the \
                   `Stripe-Signature` header is verified against the raw body **before** any \
                   parsing or processing; a failed check is a 400 and nothing is dispatched. \
                   Stripe delivers at-least-once and retries on non-2xx responses, so every \
                   handler behind this endpoint is idempotent. Unrecognized event types are \
                   logged and acknowledged.",
    operation_id = "receiveStripeWebhook",
    request_body(
        content = String,
        description = "Raw JSON payload of the Stripe event. Verified against the signature \
                       header before parsing.",
    ),
    responses(
        ( status = 200, description = "Webhook received and acknowledged", body = WebhookAck),
        ( status = 400, description = "Missing or failed signature verification", body = ApiErrorResponse),
        ( status = 500, description = "Event handler failure; the provider retries delivery", body = ApiErrorResponse),
    ),
    security(()),
)]
pub async fn stripe_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, ApiError> {
    info!("Stripe webhook received");

    let event = WebhookService::construct_event(&state, &headers, &body)?;

    match WebhookService::handle_event(&state, event).await? {
        WebhookOutcome::Processed => info!("Stripe webhook processed"),
        WebhookOutcome::Ignored => info!("Stripe webhook ignored"),
    }

    Ok(Json(WebhookAck { received: true }))
}
