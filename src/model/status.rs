//! Row status values for reminders and sync log entries.
//!
//! Statuses are stored as plain strings, matching the canonical schema; these
//! constants are the only values the engines ever write.

/// Reminder delivery states. A reminder only ever moves out of `PENDING`, never back.
pub mod reminder_status {
    pub const PENDING: &str = "pending";
    pub const SENT: &str = "sent";
    pub const FAILED: &str = "failed";
}

/// Sync run states. `RUNNING` rows are closed out with exactly one of the other three.
pub mod sync_status {
    pub const RUNNING: &str = "running";
    pub const SUCCESS: &str = "success";
    pub const PARTIAL: &str = "partial";
    pub const FAILED: &str = "failed";
}

/// Notification channel names as stored on reminder rows.
pub mod channel {
    pub const BROWSER: &str = "browser";
    pub const EMAIL: &str = "email";
    pub const WHATSAPP: &str = "whatsapp";
}
