pub mod create_checkout_session;
pub mod health;
pub mod stripe_webhook;
