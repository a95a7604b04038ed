use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationChannel {
    Customer,
    Admin,
}

/// What to send, not how: delivery belongs to the `Notifier`
/// implementation.
#[derive(Debug, Clone)]
pub struct Notification {
    pub channel: NotificationChannel,
    /// Recipient address; `None` for the admin channel (the notifier
    /// knows the admin address) or when the customer never left one.
    pub to: Option<String>,
    pub subject: String,
    pub body: String,
}
