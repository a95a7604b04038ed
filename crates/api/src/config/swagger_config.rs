use crate::handlers::{
    create_checkout_session::__path_create_checkout_session, health::__path_health_check,
    stripe_webhook::__path_stripe_webhook,
};
use tourpay_primitives::error::ApiErrorResponse;
use tourpay_primitives::models::dtos::checkout_dto::{CheckoutRequest, CheckoutResponse};
use tourpay_primitives::models::dtos::health_dto::HealthStatus;
use tourpay_primitives::models::dtos::webhook_dto::WebhookAck;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(create_checkout_session, stripe_webhook, health_check),
    components(schemas(
        CheckoutRequest,
        CheckoutResponse,
        WebhookAck,
        HealthStatus,
        ApiErrorResponse
    )),
    tags(
        (name = "Checkout", description = "Checkout session creation"),
        (name = "Webhooks", description = "Payment provider callbacks"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;
