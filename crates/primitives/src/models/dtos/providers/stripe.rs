use serde::Deserialize;
use uuid::Uuid;

/// Parameters for the hosted checkout session call. Amounts are minor
/// units; `currency` is the lower-cased ISO code.
#[derive(Debug, Clone)]
pub struct CreateCheckoutSession<'a> {
    pub amount_minor: i64,
    pub currency: &'a str,
    pub tour_id: &'a str,
    pub tour_name: &'a str,
    pub booking_ref: Uuid,
    pub success_url: &'a str,
    pub cancel_url: &'a str,
    pub image_url: &'a str,
}

/// The slice of the provider's session object we consume.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSessionResponse {
    pub id: String,
    pub url: Option<String>,
}
