use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::ToSchema;

use crate::error::ApiError;

/// Raw provider event envelope: `{"id", "type", "data": {"object"}}`.
#[derive(Debug, Deserialize)]
pub struct EventEnvelope {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: EventData,
}

#[derive(Debug, Deserialize)]
pub struct EventData {
    pub object: serde_json::Value,
}

/// Event type tags this service recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum EventKind {
    #[strum(serialize = "checkout.session.completed")]
    CheckoutSessionCompleted,
    #[strum(serialize = "payment_intent.succeeded")]
    PaymentIntentSucceeded,
    #[strum(serialize = "payment_intent.payment_failed")]
    PaymentIntentPaymentFailed,
    #[strum(serialize = "invoice.payment_succeeded")]
    InvoicePaymentSucceeded,
    #[strum(serialize = "customer.subscription.created")]
    SubscriptionCreated,
    #[strum(serialize = "customer.subscription.updated")]
    SubscriptionUpdated,
    #[strum(serialize = "customer.subscription.deleted")]
    SubscriptionDeleted,
}

/// A verified provider event, one variant per recognized kind.
/// Unknown tags land in `Unrecognized` with the original type string,
/// so a new provider event never fails the endpoint.
#[derive(Debug)]
pub enum PaymentEvent {
    CheckoutSessionCompleted(CheckoutSessionObject),
    PaymentIntentSucceeded(PaymentIntentObject),
    PaymentIntentFailed(PaymentIntentObject),
    InvoicePaymentSucceeded(InvoiceObject),
    SubscriptionCreated(SubscriptionObject),
    SubscriptionUpdated(SubscriptionObject),
    SubscriptionDeleted(SubscriptionObject),
    Unrecognized(String),
}

impl PaymentEvent {
    /// Parse the raw (already signature-verified) webhook body.
    pub fn parse(body: &[u8]) -> Result<Self, ApiError> {
        let envelope: EventEnvelope = serde_json::from_slice(body)
            .map_err(|e| ApiError::Webhook(format!("Invalid event payload: {}", e)))?;
        Self::from_envelope(envelope)
    }

    pub fn from_envelope(envelope: EventEnvelope) -> Result<Self, ApiError> {
        let Ok(kind) = EventKind::from_str(&envelope.kind) else {
            return Ok(PaymentEvent::Unrecognized(envelope.kind));
        };

        fn object<T: serde::de::DeserializeOwned>(
            value: serde_json::Value,
        ) -> Result<T, ApiError> {
            serde_json::from_value(value)
                .map_err(|e| ApiError::Webhook(format!("Invalid event object: {}", e)))
        }

        let event = match kind {
            EventKind::CheckoutSessionCompleted => {
                PaymentEvent::CheckoutSessionCompleted(object(envelope.data.object)?)
            }
            EventKind::PaymentIntentSucceeded => {
                PaymentEvent::PaymentIntentSucceeded(object(envelope.data.object)?)
            }
            EventKind::PaymentIntentPaymentFailed => {
                PaymentEvent::PaymentIntentFailed(object(envelope.data.object)?)
            }
            EventKind::InvoicePaymentSucceeded => {
                PaymentEvent::InvoicePaymentSucceeded(object(envelope.data.object)?)
            }
            EventKind::SubscriptionCreated => {
                PaymentEvent::SubscriptionCreated(object(envelope.data.object)?)
            }
            EventKind::SubscriptionUpdated => {
                PaymentEvent::SubscriptionUpdated(object(envelope.data.object)?)
            }
            EventKind::SubscriptionDeleted => {
                PaymentEvent::SubscriptionDeleted(object(envelope.data.object)?)
            }
        };

        Ok(event)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSessionObject {
    pub id: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    pub customer_email: Option<String>,
    pub customer_details: Option<CustomerDetails>,
    pub amount_total: Option<i64>,
    pub currency: Option<String>,
    pub payment_intent: Option<String>,
    pub payment_status: Option<String>,
}

impl CheckoutSessionObject {
    /// Prefers the post-checkout customer details over the email the
    /// session was created with.
    pub fn email(&self) -> Option<&str> {
        self.customer_details
            .as_ref()
            .and_then(|d| d.email.as_deref())
            .or(self.customer_email.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerDetails {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntentObject {
    pub id: String,
    pub last_payment_error: Option<PaymentError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentError {
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceObject {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionObject {
    pub id: String,
}

/// Acknowledgement body the provider expects on successful receipt.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WebhookAck {
    pub received: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_a_completed_checkout_session() {
        let body = json!({
            "id": "evt_1",
            "type": "checkout.session.completed",
            "data": {
                "object": {
                    "id": "cs_test_1",
                    "metadata": {
                        "tourId": "7-day-baobab-safari",
                        "tourName": "7-Day Baobab Safari"
                    },
                    "customer_details": {"email": "traveler@example.com"},
                    "amount_total": 285000,
                    "currency": "usd",
                    "payment_intent": "pi_1",
                    "payment_status": "paid"
                }
            }
        })
        .to_string();

        let event = PaymentEvent::parse(body.as_bytes()).unwrap();
        let PaymentEvent::CheckoutSessionCompleted(session) = event else {
            panic!("wrong variant");
        };
        assert_eq!(session.id, "cs_test_1");
        assert_eq!(session.email(), Some("traveler@example.com"));
        assert_eq!(session.metadata["tourId"], "7-day-baobab-safari");
        assert_eq!(session.amount_total, Some(285000));
    }

    #[test]
    fn unknown_event_kinds_are_preserved_not_rejected() {
        let body = json!({
            "id": "evt_2",
            "type": "payout.created",
            "data": {"object": {"id": "po_1"}}
        })
        .to_string();

        let event = PaymentEvent::parse(body.as_bytes()).unwrap();
        assert!(matches!(event, PaymentEvent::Unrecognized(kind) if kind == "payout.created"));
    }

    #[test]
    fn payment_intent_carries_the_failure_message() {
        let body = json!({
            "id": "evt_3",
            "type": "payment_intent.payment_failed",
            "data": {
                "object": {
                    "id": "pi_2",
                    "last_payment_error": {"message": "Your card was declined."}
                }
            }
        })
        .to_string();

        let event = PaymentEvent::parse(body.as_bytes()).unwrap();
        let PaymentEvent::PaymentIntentFailed(intent) = event else {
            panic!("wrong variant");
        };
        assert_eq!(intent.id, "pi_2");
        assert_eq!(
            intent.last_payment_error.unwrap().message.as_deref(),
            Some("Your card was declined.")
        );
    }

    #[test]
    fn malformed_envelope_is_a_webhook_error() {
        assert!(matches!(
            PaymentEvent::parse(b"not json"),
            Err(ApiError::Webhook(_))
        ));
    }

    #[test]
    fn recognized_kind_with_malformed_object_is_a_webhook_error() {
        let body = json!({
            "id": "evt_4",
            "type": "payment_intent.succeeded",
            "data": {"object": {"last_payment_error": null}}
        })
        .to_string();

        assert!(matches!(
            PaymentEvent::parse(body.as_bytes()),
            Err(ApiError::Webhook(_))
        ));
    }
}
