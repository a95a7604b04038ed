use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use tracing::error;

use tourpay_primitives::error::ApiError;
pub use tourpay_primitives::models::dtos::providers::stripe::{
    CheckoutSessionResponse, CreateCheckoutSession,
};

const ALLOWED_SHIPPING_COUNTRIES: &[&str] = &[
    "US", "CA", "GB", "AU", "DE", "FR", "ES", "IT", "NL", "BE", "CH", "AT", "SE", "NO", "DK", "FI",
    "JP", "CN", "IN", "BR", "ZA",
];

#[derive(Clone)]
pub struct StripeClient {
    http: Client,
    base_url: Url,
    secret_key: SecretString,
}

impl StripeClient {
    pub fn new(http: Client, base_url: &str, secret_key: SecretString) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|_| ApiError::Config("Invalid Stripe base URL".into()))?;

        Ok(Self {
            http,
            base_url,
            secret_key,
        })
    }

    pub async fn create_checkout_session(
        &self,
        params: CreateCheckoutSession<'_>,
    ) -> Result<CheckoutSessionResponse, ApiError> {
        let url = self.endpoint("v1/checkout/sessions");
        let form = Self::session_form(&params);

        let resp = self
            .http
            .post(url)
            .bearer_auth(self.secret_key.expose_secret())
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to reach Stripe");
                ApiError::Payment("Stripe service unavailable".into())
            })?;

        let status = resp.status();
        let body_text = resp.text().await.unwrap_or_default();

        if !status.is_success() {
            error!(
                http_status = status.as_u16(),
                response = %body_text.chars().take(200).collect::<String>(),
                "Stripe checkout session creation failed"
            );
            return Err(ApiError::Payment("Stripe request failed".into()));
        }

        let session: CheckoutSessionResponse = serde_json::from_str(&body_text).map_err(|e| {
            error!(
                error = %e,
                response = %body_text.chars().take(200).collect::<String>(),
                "Invalid JSON from Stripe"
            );
            ApiError::Payment("Invalid Stripe response".into())
        })?;

        Ok(session)
    }

    /// The sessions endpoint takes `application/x-www-form-urlencoded`
    /// with bracketed keys for nested fields.
    fn session_form(params: &CreateCheckoutSession<'_>) -> Vec<(String, String)> {
        let mut form: Vec<(String, String)> = vec![
            ("mode".into(), "payment".into()),
            ("payment_method_types[0]".into(), "card".into()),
            ("line_items[0][quantity]".into(), "1".into()),
            (
                "line_items[0][price_data][currency]".into(),
                params.currency.into(),
            ),
            (
                "line_items[0][price_data][unit_amount]".into(),
                params.amount_minor.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]".into(),
                params.tour_name.into(),
            ),
            (
                "line_items[0][price_data][product_data][description]".into(),
                format!("Safari tour booking for {}", params.tour_name),
            ),
            (
                "line_items[0][price_data][product_data][images][0]".into(),
                params.image_url.into(),
            ),
            ("success_url".into(), params.success_url.into()),
            ("cancel_url".into(), params.cancel_url.into()),
            (
                "client_reference_id".into(),
                params.booking_ref.to_string(),
            ),
            ("metadata[tourId]".into(), params.tour_id.into()),
            ("metadata[tourName]".into(), params.tour_name.into()),
            ("metadata[bookingRef]".into(), params.booking_ref.to_string()),
            ("billing_address_collection".into(), "required".into()),
        ];

        for (i, country) in ALLOWED_SHIPPING_COUNTRIES.iter().enumerate() {
            form.push((
                format!("shipping_address_collection[allowed_countries][{}]", i),
                (*country).into(),
            ));
        }

        form
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn field<'a>(form: &'a [(String, String)], key: &str) -> Option<&'a str> {
        form.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn session_form_carries_amount_currency_and_metadata() {
        let booking_ref = Uuid::new_v4();
        let form = StripeClient::session_form(&CreateCheckoutSession {
            amount_minor: 285000,
            currency: "usd",
            tour_id: "7-day-baobab-safari",
            tour_name: "7-Day Baobab Safari",
            booking_ref,
            success_url: "http://localhost:8080/booking-success?session_id={CHECKOUT_SESSION_ID}",
            cancel_url: "http://localhost:8080/tours/7-day-baobab-safari",
            image_url: "http://localhost:8080/images/tours/7-day-baobab-safari.webp",
        });

        assert_eq!(field(&form, "mode"), Some("payment"));
        assert_eq!(field(&form, "payment_method_types[0]"), Some("card"));
        assert_eq!(
            field(&form, "line_items[0][price_data][unit_amount]"),
            Some("285000")
        );
        assert_eq!(
            field(&form, "line_items[0][price_data][currency]"),
            Some("usd")
        );
        assert_eq!(
            field(&form, "metadata[tourId]"),
            Some("7-day-baobab-safari")
        );
        assert_eq!(
            field(&form, "metadata[bookingRef]").map(str::to_owned),
            Some(booking_ref.to_string())
        );
        assert_eq!(
            field(&form, "success_url"),
            Some("http://localhost:8080/booking-success?session_id={CHECKOUT_SESSION_ID}")
        );
    }

    #[test]
    fn shipping_countries_are_enumerated() {
        let form = StripeClient::session_form(&CreateCheckoutSession {
            amount_minor: 100,
            currency: "usd",
            tour_id: "t",
            tour_name: "T",
            booking_ref: Uuid::new_v4(),
            success_url: "s",
            cancel_url: "c",
            image_url: "i",
        });

        assert_eq!(
            field(&form, "shipping_address_collection[allowed_countries][0]"),
            Some("US")
        );
        assert_eq!(
            field(&form, "shipping_address_collection[allowed_countries][20]"),
            Some("ZA")
        );
    }
}
