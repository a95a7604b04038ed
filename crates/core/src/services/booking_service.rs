use chrono::Utc;
use tracing::{info, warn};

pub use crate::app_state::AppState;
pub use tourpay_primitives::{
    error::ApiError,
    models::{
        dtos::notification_dto::{Notification, NotificationChannel},
        dtos::webhook_dto::{CheckoutSessionObject, PaymentIntentObject},
        entities::booking::Booking,
        entities::enum_types::{BookingStatus, CurrencyCode, PaymentStatus},
    },
};

pub struct BookingService;

impl BookingService {
    pub async fn handle_checkout_completed(
        state: &AppState,
        session: CheckoutSessionObject,
    ) -> Result<(), ApiError> {
        info!(session_id = %session.id, "Checkout session completed");

        // Idempotency guard: the provider redelivers on slow responses.
        if let Some(existing) = state.bookings.find_by_session(&session.id).await? {
            info!(session_id = %existing.session_id, "Booking already processed");
            return Ok(());
        }

        let booking = Self::booking_from_session(&session)?;
        let booking = state.bookings.upsert(booking).await?;

        state
            .notifier
            .notify(Self::customer_confirmation(&booking))
            .await?;
        state
            .notifier
            .notify(Self::admin_notification(&booking))
            .await?;

        info!(session_id = %booking.session_id, "Booking processed");
        Ok(())
    }

    pub async fn handle_payment_succeeded(
        state: &AppState,
        intent: PaymentIntentObject,
    ) -> Result<(), ApiError> {
        info!(payment_intent = %intent.id, "Payment succeeded");

        let updated = state
            .bookings
            .update_payment_status(&intent.id, PaymentStatus::Paid)
            .await?;

        match updated {
            Some(booking) => {
                state
                    .notifier
                    .notify(Notification {
                        channel: NotificationChannel::Customer,
                        to: booking.customer_email.clone(),
                        subject: "Payment received".into(),
                        body: format!(
                            "Your payment of {:.2} {} for {} has been received.",
                            booking.amount_major(),
                            booking.currency,
                            booking.tour_name
                        ),
                    })
                    .await?;
            }
            None => {
                warn!(payment_intent = %intent.id, "No booking found for payment intent");
            }
        }

        Ok(())
    }

    pub async fn handle_payment_failed(
        state: &AppState,
        intent: PaymentIntentObject,
    ) -> Result<(), ApiError> {
        info!(payment_intent = %intent.id, "Payment failed");

        let reason = intent
            .last_payment_error
            .as_ref()
            .and_then(|e| e.message.clone())
            .unwrap_or_else(|| "Unknown error".into());

        let updated = state
            .bookings
            .update_payment_status(&intent.id, PaymentStatus::Failed)
            .await?;

        match updated {
            Some(booking) => {
                state
                    .notifier
                    .notify(Notification {
                        channel: NotificationChannel::Customer,
                        to: booking.customer_email.clone(),
                        subject: "Payment failed".into(),
                        body: format!(
                            "Your payment for {} could not be completed: {}",
                            booking.tour_name, reason
                        ),
                    })
                    .await?;
            }
            None => {
                warn!(payment_intent = %intent.id, "No booking found for payment intent");
            }
        }

        Ok(())
    }

    fn booking_from_session(session: &CheckoutSessionObject) -> Result<Booking, ApiError> {
        let tour_id = session
            .metadata
            .get("tourId")
            .cloned()
            .ok_or(ApiError::Webhook("Session metadata missing tourId".into()))?;
        let tour_name = session
            .metadata
            .get("tourName")
            .cloned()
            .ok_or(ApiError::Webhook("Session metadata missing tourName".into()))?;
        let booking_ref = session
            .metadata
            .get("bookingRef")
            .and_then(|s| s.parse().ok());

        let currency = match session.currency.as_deref() {
            Some(code) => CurrencyCode::parse(code)
                .map_err(|_| ApiError::Webhook(format!("Unsupported session currency: {}", code)))?,
            None => CurrencyCode::USD,
        };

        Ok(Booking {
            session_id: session.id.clone(),
            booking_ref,
            tour_id,
            tour_name,
            customer_email: session.email().map(str::to_owned),
            amount_minor: session.amount_total.unwrap_or_default(),
            currency,
            status: BookingStatus::Confirmed,
            payment_status: PaymentStatus::Paid,
            payment_intent_id: session.payment_intent.clone(),
            created_at: Utc::now(),
        })
    }

    fn customer_confirmation(booking: &Booking) -> Notification {
        Notification {
            channel: NotificationChannel::Customer,
            to: booking.customer_email.clone(),
            subject: format!("Booking confirmed: {}", booking.tour_name),
            body: format!(
                "Your booking for {} is confirmed. Amount paid: {:.2} {}. Reference: {}.",
                booking.tour_name,
                booking.amount_major(),
                booking.currency,
                booking.session_id
            ),
        }
    }

    fn admin_notification(booking: &Booking) -> Notification {
        Notification {
            channel: NotificationChannel::Admin,
            to: None,
            subject: "New booking received".into(),
            body: format!(
                "Booking {} for {} ({}) — {:.2} {}, customer {}.",
                booking.session_id,
                booking.tour_name,
                booking.tour_id,
                booking.amount_major(),
                booking.currency,
                booking.customer_email.as_deref().unwrap_or("unknown")
            ),
        }
    }
}
