pub mod app_config;
pub mod stripe_details;

pub use app_config::AppConfig;
pub use stripe_details::StripeInfo;
