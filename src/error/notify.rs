use thiserror::Error;

/// Errors raised while delivering a reminder through a message-based channel.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The recipient has no phone number on file for a WhatsApp reminder.
    #[error("No phone number on file for user {0}")]
    MissingPhoneNumber(i32),
    /// The message transport accepted the request but reported a delivery failure.
    #[error("Message delivery failed: {0}")]
    Delivery(String),
    /// Network-level failure reaching the message transport.
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}
