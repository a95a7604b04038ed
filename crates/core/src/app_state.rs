use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::clients::{EmailNotifier, Notifier, StripeClient};
use crate::repositories::booking_repository::{BookingStore, InMemoryBookingStore};
use eyre::Result;
pub use tourpay_primitives::models::app_state::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub http_client: Client,
    pub config: AppConfig,
    pub stripe: StripeClient,
    pub bookings: Arc<dyn BookingStore>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Arc<Self>> {
        let bookings: Arc<dyn BookingStore> = Arc::new(InMemoryBookingStore::new());
        let notifier: Arc<dyn Notifier> = Arc::new(EmailNotifier::new(config.admin_email.clone()));

        Self::with_collaborators(config, bookings, notifier)
    }

    /// Build the state around explicit collaborators. Tests use this to
    /// inject a store handle and a recording notifier.
    pub fn with_collaborators(
        config: AppConfig,
        bookings: Arc<dyn BookingStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Arc<Self>> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;

        let stripe = StripeClient::new(
            http.clone(),
            &config.stripe_details.stripe_api_url,
            config.stripe_details.stripe_secret_key.clone(),
        )?;

        Ok(Arc::new(Self {
            http_client: http,
            config,
            stripe,
            bookings,
            notifier,
        }))
    }
}
