use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::ApiError;
use crate::models::entities::enum_types::CurrencyCode;

pub const MISSING_REQUIRED_FIELDS: &str = "Missing required fields: tourId, tourName, price";

/// Raw checkout request body. Every field is optional at the serde
/// layer so that an absent field produces our own 400, not a
/// deserializer rejection.
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[schema(example = "7-day-baobab-safari")]
    pub tour_id: Option<String>,
    #[schema(example = "7-Day Baobab Safari")]
    pub tour_name: Option<String>,
    /// Price in major units of the given currency.
    #[schema(example = 2850.0)]
    pub price: Option<f64>,
    #[validate(length(min = 3, max = 3))]
    #[schema(example = "USD")]
    pub currency: Option<String>,
}

/// A checkout request with presence and currency checks applied.
#[derive(Debug, Clone)]
pub struct PurchaseRequest {
    pub tour_id: String,
    pub tour_name: String,
    pub price: f64,
    pub currency: CurrencyCode,
}

impl CheckoutRequest {
    pub fn into_purchase(self) -> Result<PurchaseRequest, ApiError> {
        let tour_id = self.tour_id.filter(|s| !s.trim().is_empty());
        let tour_name = self.tour_name.filter(|s| !s.trim().is_empty());
        let price = self.price.filter(|p| *p > 0.0);

        let (Some(tour_id), Some(tour_name), Some(price)) = (tour_id, tour_name, price) else {
            return Err(ApiError::BadRequest(MISSING_REQUIRED_FIELDS.into()));
        };

        let currency = match self.currency.as_deref() {
            Some(code) => CurrencyCode::parse(code)?,
            None => CurrencyCode::USD,
        };

        Ok(PurchaseRequest {
            tour_id,
            tour_name,
            price,
            currency,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub session_id: String,
    /// Provider-hosted payment page the browser should redirect to.
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        tour_id: Option<&str>,
        tour_name: Option<&str>,
        price: Option<f64>,
        currency: Option<&str>,
    ) -> CheckoutRequest {
        CheckoutRequest {
            tour_id: tour_id.map(str::to_owned),
            tour_name: tour_name.map(str::to_owned),
            price,
            currency: currency.map(str::to_owned),
        }
    }

    #[test]
    fn absent_or_empty_fields_yield_the_exact_missing_fields_error() {
        let cases = [
            request(None, Some("7-Day Baobab Safari"), Some(2850.0), None),
            request(Some("7-day-baobab-safari"), None, Some(2850.0), None),
            request(
                Some("7-day-baobab-safari"),
                Some("7-Day Baobab Safari"),
                None,
                None,
            ),
            request(Some(""), Some("7-Day Baobab Safari"), Some(2850.0), None),
            request(Some("7-day-baobab-safari"), Some("  "), Some(2850.0), None),
            request(
                Some("7-day-baobab-safari"),
                Some("7-Day Baobab Safari"),
                Some(0.0),
                None,
            ),
        ];

        for case in cases {
            match case.into_purchase() {
                Err(ApiError::BadRequest(msg)) => assert_eq!(msg, MISSING_REQUIRED_FIELDS),
                other => panic!("expected missing-fields rejection, got {:?}", other),
            }
        }
    }

    #[test]
    fn currency_defaults_to_usd() {
        let purchase = request(
            Some("7-day-baobab-safari"),
            Some("7-Day Baobab Safari"),
            Some(2850.0),
            None,
        )
        .into_purchase()
        .unwrap();

        assert_eq!(purchase.currency, CurrencyCode::USD);
        assert_eq!(purchase.price, 2850.0);
    }

    #[test]
    fn unsupported_currency_is_rejected() {
        let result = request(
            Some("7-day-baobab-safari"),
            Some("7-Day Baobab Safari"),
            Some(2850.0),
            Some("XXX"),
        )
        .into_purchase();

        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn camel_case_body_round_trips() {
        let req: CheckoutRequest = serde_json::from_str(
            r#"{"tourId":"7-day-baobab-safari","tourName":"7-Day Baobab Safari","price":2850,"currency":"USD"}"#,
        )
        .unwrap();

        let purchase = req.into_purchase().unwrap();
        assert_eq!(purchase.tour_id, "7-day-baobab-safari");
        assert_eq!(purchase.currency, CurrencyCode::USD);
    }
}
