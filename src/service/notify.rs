//! Outbound message delivery for reminder dispatch.
//!
//! The dispatcher only depends on the [`NotificationSender`] seam; the production
//! implementation posts to the Twilio WhatsApp API. Browser and email channels are
//! delivered by the presentation layer and never reach a sender.

use std::{future::Future, pin::Pin};

use crate::error::{notify::NotifyError, Error};

/// Payload handed to a message-based channel for one reminder.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderMessage {
    pub channel: String,
    /// Channel-specific address (phone number for WhatsApp)
    pub recipient: String,
    pub contest_name: String,
    pub platform: String,
    /// Human-readable lead, e.g. "Starts in 1h 30m"
    pub time_until: String,
}

/// Capability for delivering one reminder message over its channel.
pub trait NotificationSender: Send + Sync {
    fn send<'a>(
        &'a self,
        message: &'a ReminderMessage,
    ) -> Pin<Box<dyn Future<Output = Result<(), Error>> + Send + 'a>>;
}

const TWILIO_API_BASE: &str = "https://api.twilio.com";

/// WhatsApp delivery through the Twilio Messages API.
pub struct TwilioWhatsAppSender {
    http: reqwest::Client,
    account_sid: String,
    auth_token: String,
    from_number: String,
    api_base: String,
}

impl TwilioWhatsAppSender {
    pub fn new(
        http: reqwest::Client,
        account_sid: String,
        auth_token: String,
        from_number: String,
    ) -> Self {
        Self {
            http,
            account_sid,
            auth_token,
            from_number,
            api_base: TWILIO_API_BASE.to_string(),
        }
    }

    /// Overrides the Twilio API base URL (regional endpoints, tests).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

impl NotificationSender for TwilioWhatsAppSender {
    fn send<'a>(
        &'a self,
        message: &'a ReminderMessage,
    ) -> Pin<Box<dyn Future<Output = Result<(), Error>> + Send + 'a>> {
        Box::pin(async move {
            let to = with_whatsapp_prefix(&message.recipient);
            let from = with_whatsapp_prefix(&self.from_number);
            let body = format!(
                "🔔 *AlgoBell Contest Reminder*\n\n📊 *{}*\n🏷️ Platform: {}\n⏰ {}\n\nGood luck! 🚀",
                message.contest_name, message.platform, message.time_until
            );

            let url = format!(
                "{}/2010-04-01/Accounts/{}/Messages.json",
                self.api_base, self.account_sid
            );

            let response = self
                .http
                .post(&url)
                .basic_auth(&self.account_sid, Some(&self.auth_token))
                .form(&[
                    ("To", to.as_str()),
                    ("From", from.as_str()),
                    ("Body", body.as_str()),
                ])
                .send()
                .await
                .map_err(NotifyError::from)?;

            if !response.status().is_success() {
                let detail = response.text().await.unwrap_or_default();
                return Err(NotifyError::Delivery(detail).into());
            }

            Ok(())
        })
    }
}

fn with_whatsapp_prefix(number: &str) -> String {
    if number.starts_with("whatsapp:") {
        number.to_string()
    } else {
        format!("whatsapp:{number}")
    }
}

/// Sender used when no message transport is configured; drops messages with a log
/// line so dispatch bookkeeping still proceeds.
pub struct DisabledSender;

impl NotificationSender for DisabledSender {
    fn send<'a>(
        &'a self,
        message: &'a ReminderMessage,
    ) -> Pin<Box<dyn Future<Output = Result<(), Error>> + Send + 'a>> {
        Box::pin(async move {
            tracing::warn!(
                "No message transport configured, dropping {} reminder for {:?}",
                message.channel,
                message.contest_name
            );
            Ok(())
        })
    }
}
