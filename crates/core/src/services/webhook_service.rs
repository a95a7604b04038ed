use chrono::Utc;
use hmac::{Hmac, Mac};
use http::HeaderMap;
use secrecy::ExposeSecret;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::info;

pub use crate::app_state::AppState;
use crate::services::booking_service::BookingService;
pub use tourpay_primitives::{error::ApiError, models::dtos::webhook_dto::PaymentEvent};

/// Maximum accepted age of a signed webhook timestamp.
pub const SIGNATURE_TOLERANCE_SECS: i64 = 300;

pub enum WebhookOutcome {
    Processed,
    Ignored,
}

pub struct WebhookService;

impl WebhookService {
    /// Verify the signature over the raw body and parse the event.
    /// Nothing downstream runs unless this succeeds.
    pub fn construct_event(
        state: &AppState,
        headers: &HeaderMap,
        body: &[u8],
    ) -> Result<PaymentEvent, ApiError> {
        let signature = headers
            .get("stripe-signature")
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Signature("Missing Stripe signature".into()))?;

        Self::verify_signature(
            state
                .config
                .stripe_details
                .stripe_webhook_secret
                .expose_secret(),
            body,
            signature,
            Utc::now().timestamp(),
        )?;

        PaymentEvent::parse(body)
    }

    /// The provider signs `"{t}.{payload}"` with HMAC-SHA256 and sends
    /// `t=<unix>,v1=<hex>` in the `stripe-signature` header. Multiple
    /// `v1` entries are possible during secret rotation.
    pub fn verify_signature(
        secret: &str,
        payload: &[u8],
        signature_header: &str,
        now: i64,
    ) -> Result<(), ApiError> {
        let mut timestamp: Option<i64> = None;
        let mut candidates: Vec<&str> = Vec::new();

        for part in signature_header.split(',') {
            match part.trim().split_once('=') {
                Some(("t", value)) => timestamp = value.parse().ok(),
                Some(("v1", value)) => candidates.push(value),
                _ => {}
            }
        }

        let timestamp =
            timestamp.ok_or(ApiError::Signature("Malformed signature header".into()))?;
        if candidates.is_empty() {
            return Err(ApiError::Signature("Malformed signature header".into()));
        }

        if (now - timestamp).abs() > SIGNATURE_TOLERANCE_SECS {
            return Err(ApiError::Signature("Signature timestamp outside tolerance".into()));
        }

        type HmacSha256 = Hmac<Sha256>;

        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|_| ApiError::Config("Invalid webhook secret".into()))?;
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        let expected = hex::encode(mac.finalize().into_bytes());

        let matched = candidates
            .iter()
            .any(|candidate| expected.as_bytes().ct_eq(candidate.as_bytes()).unwrap_u8() == 1);

        if !matched {
            return Err(ApiError::Signature("Invalid signature".into()));
        }

        Ok(())
    }

    /// Dispatch a verified event. Exactly one arm per recognized kind;
    /// kinds with no side effects acknowledge as `Ignored`.
    pub async fn handle_event(
        state: &AppState,
        event: PaymentEvent,
    ) -> Result<WebhookOutcome, ApiError> {
        match event {
            PaymentEvent::CheckoutSessionCompleted(session) => {
                BookingService::handle_checkout_completed(state, session).await?;
                Ok(WebhookOutcome::Processed)
            }
            PaymentEvent::PaymentIntentSucceeded(intent) => {
                BookingService::handle_payment_succeeded(state, intent).await?;
                Ok(WebhookOutcome::Processed)
            }
            PaymentEvent::PaymentIntentFailed(intent) => {
                BookingService::handle_payment_failed(state, intent).await?;
                Ok(WebhookOutcome::Processed)
            }
            PaymentEvent::InvoicePaymentSucceeded(invoice) => {
                info!(invoice_id = %invoice.id, "Invoice payment succeeded");
                Ok(WebhookOutcome::Ignored)
            }
            PaymentEvent::SubscriptionCreated(subscription) => {
                info!(subscription_id = %subscription.id, "Subscription created");
                Ok(WebhookOutcome::Ignored)
            }
            PaymentEvent::SubscriptionUpdated(subscription) => {
                info!(subscription_id = %subscription.id, "Subscription updated");
                Ok(WebhookOutcome::Ignored)
            }
            PaymentEvent::SubscriptionDeleted(subscription) => {
                info!(subscription_id = %subscription.id, "Subscription deleted");
                Ok(WebhookOutcome::Ignored)
            }
            PaymentEvent::Unrecognized(kind) => {
                info!(event_type = %kind, "Unhandled event type");
                Ok(WebhookOutcome::Ignored)
            }
        }
    }
}
