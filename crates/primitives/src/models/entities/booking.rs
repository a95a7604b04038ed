use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::enum_types::{BookingStatus, CurrencyCode, PaymentStatus};

/// A confirmed tour purchase, derived from a completed checkout
/// session. Keyed by the provider's session id; `booking_ref` is the
/// reference we minted when the session was created and echoed back
/// through session metadata.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Booking {
    pub session_id: String,
    pub booking_ref: Option<Uuid>,
    pub tour_id: String,
    pub tour_name: String,
    pub customer_email: Option<String>,
    pub amount_minor: i64, // cents
    pub currency: CurrencyCode,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub payment_intent_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn amount_major(&self) -> f64 {
        self.amount_minor as f64 / 100.0
    }
}
