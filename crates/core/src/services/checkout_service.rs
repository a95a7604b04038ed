use tracing::info;
use uuid::Uuid;

pub use crate::app_state::AppState;
pub use tourpay_primitives::{
    error::ApiError,
    models::dtos::checkout_dto::{CheckoutResponse, PurchaseRequest},
};
use tourpay_primitives::models::dtos::providers::stripe::CreateCheckoutSession;
use tourpay_primitives::utility::to_minor_units;

pub struct CheckoutService;

impl CheckoutService {
    pub async fn create_session(
        state: &AppState,
        req: PurchaseRequest,
    ) -> Result<CheckoutResponse, ApiError> {
        let booking_ref = Uuid::new_v4();
        let amount = to_minor_units(req.price);
        let currency = req.currency.provider_code();

        // {CHECKOUT_SESSION_ID} is substituted by the provider on redirect.
        let success_url = format!(
            "{}/booking-success?session_id={{CHECKOUT_SESSION_ID}}",
            state.config.app_url
        );
        let cancel_url = format!("{}/tours/{}", state.config.app_url, req.tour_id);
        let image_url = format!("{}/images/tours/{}.webp", state.config.app_url, req.tour_id);

        let session = state
            .stripe
            .create_checkout_session(CreateCheckoutSession {
                amount_minor: amount,
                currency: &currency,
                tour_id: &req.tour_id,
                tour_name: &req.tour_name,
                booking_ref,
                success_url: &success_url,
                cancel_url: &cancel_url,
                image_url: &image_url,
            })
            .await?;

        info!(
            session_id = %session.id,
            tour_id = %req.tour_id,
            amount_minor = amount,
            "Stripe session created"
        );

        let url = session
            .url
            .ok_or_else(|| ApiError::Payment("Stripe session missing redirect URL".into()))?;

        Ok(CheckoutResponse {
            session_id: session.id,
            url,
        })
    }
}
