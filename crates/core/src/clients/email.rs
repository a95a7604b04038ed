use async_trait::async_trait;
use tracing::info;

use tourpay_primitives::error::ApiError;
use tourpay_primitives::models::dtos::notification_dto::{Notification, NotificationChannel};

/// Outbound notification seam. Handlers call this; delivery lives in
/// the implementation so tests can swap in a recording double.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification) -> Result<(), ApiError>;
}

#[derive(Clone)]
pub struct EmailNotifier {
    admin_email: String,
}

impl EmailNotifier {
    pub fn new(admin_email: String) -> Self {
        Self { admin_email }
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), ApiError> {
        let to = match notification.channel {
            NotificationChannel::Admin => self.admin_email.clone(),
            NotificationChannel::Customer => match notification.to {
                Some(to) => to,
                None => {
                    info!(
                        subject = %notification.subject,
                        "Customer notification has no recipient, skipping"
                    );
                    return Ok(());
                }
            },
        };

        // Placeholder for real email sending logic
        info!(
            channel = %notification.channel,
            to = %to,
            subject = %notification.subject,
            "Sending email"
        );
        Ok(())
    }
}
