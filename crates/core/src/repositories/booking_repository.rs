use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use tourpay_primitives::error::ApiError;
use tourpay_primitives::models::entities::booking::Booking;
use tourpay_primitives::models::entities::enum_types::{BookingStatus, PaymentStatus};

/// Persistence seam for bookings. The provider delivers webhooks
/// at-least-once, so every operation must tolerate replays.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Insert keyed by checkout session id. A replay of an already
    /// stored session returns the existing booking untouched.
    async fn upsert(&self, booking: Booking) -> Result<Booking, ApiError>;

    async fn find_by_session(&self, session_id: &str) -> Result<Option<Booking>, ApiError>;

    /// Flip the payment status of the booking tied to a payment
    /// intent. Returns `None` when no booking references the intent.
    async fn update_payment_status(
        &self,
        payment_intent_id: &str,
        status: PaymentStatus,
    ) -> Result<Option<Booking>, ApiError>;
}

/// Thread-safe in-memory store with a payment-intent index maintained
/// on insert, so intent events can find their booking later.
#[derive(Default)]
pub struct InMemoryBookingStore {
    inner: RwLock<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    bookings: HashMap<String, Booking>,
    by_intent: HashMap<String, String>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.bookings.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn upsert(&self, booking: Booking) -> Result<Booking, ApiError> {
        let mut inner = self.inner.write().await;

        if let Some(existing) = inner.bookings.get(&booking.session_id) {
            return Ok(existing.clone());
        }

        if let Some(intent) = booking.payment_intent_id.clone() {
            inner.by_intent.insert(intent, booking.session_id.clone());
        }
        inner
            .bookings
            .insert(booking.session_id.clone(), booking.clone());

        Ok(booking)
    }

    async fn find_by_session(&self, session_id: &str) -> Result<Option<Booking>, ApiError> {
        Ok(self.inner.read().await.bookings.get(session_id).cloned())
    }

    async fn update_payment_status(
        &self,
        payment_intent_id: &str,
        status: PaymentStatus,
    ) -> Result<Option<Booking>, ApiError> {
        let mut inner = self.inner.write().await;

        let Some(session_id) = inner.by_intent.get(payment_intent_id).cloned() else {
            return Ok(None);
        };

        let Some(booking) = inner.bookings.get_mut(&session_id) else {
            return Ok(None);
        };

        booking.payment_status = status;
        booking.status = match status {
            PaymentStatus::Paid => BookingStatus::Confirmed,
            PaymentStatus::Failed => BookingStatus::Failed,
        };

        Ok(Some(booking.clone()))
    }
}
