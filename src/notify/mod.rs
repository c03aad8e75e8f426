//! Outbound SMS notifications for new alerts

pub mod elks;
pub mod message;
pub mod recipient;

pub use elks::{ElksConfig, ElksSender};
pub use message::format_message;
pub use recipient::{Recipient, REQUIRED_PREFIX};

use async_trait::async_trait;

/// Delivers a formatted message to a recipient
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Make a single delivery attempt
    async fn send(&self, recipient: &Recipient, message: &str) -> Result<(), NotifyError>;
}

/// Sender that only logs, for running without provider credentials
#[derive(Debug, Default)]
pub struct LogSender;

#[async_trait]
impl NotificationSender for LogSender {
    async fn send(&self, recipient: &Recipient, message: &str) -> Result<(), NotifyError> {
        tracing::warn!(recipient = %recipient, "Dry run, SMS not sent: {}", message);
        Ok(())
    }
}

/// Notification errors
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Invalid recipient {0:?}: must start with {}", REQUIRED_PREFIX)]
    InvalidRecipient(String),

    #[error("SMS error: {0}")]
    Send(String),
}
