pub mod email;
pub mod stripe;

pub use email::{EmailNotifier, Notifier};
pub use stripe::StripeClient;
