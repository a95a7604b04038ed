use crate::models::app_state::stripe_details::StripeInfo;
use eyre::Report;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Public base URL of the tour site; checkout redirect and image
    /// URLs are built from it.
    pub app_url: String,

    pub admin_email: String,

    pub stripe_details: StripeInfo,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Report> {
        Ok(Self {
            app_url: env::var("SITE_URL").unwrap_or_else(|_| "http://localhost:8080".into()),

            admin_email: env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "bookings@baobabboundadventures.com".into()),

            stripe_details: StripeInfo::new()?,
        })
    }
}
