use std::sync::Arc;

use crate::{
    config::Config,
    error::Error,
    service::notify::{DisabledSender, NotificationSender, TwilioWhatsAppSender},
};

static USER_AGENT: &str = concat!("AlgoBell/", env!("CARGO_PKG_VERSION"));

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Build the HTTP client shared by providers and the message transport
pub fn build_http_client() -> Result<reqwest::Client, Error> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| Error::InternalError(format!("Failed to build HTTP client: {e}")))
}

/// Build the outbound message sender from configured credentials.
///
/// Without a complete Twilio configuration, message-based reminders are dropped
/// with a log line while the rest of the dispatch pipeline keeps working.
pub fn build_notifier(config: &Config, http: &reqwest::Client) -> Arc<dyn NotificationSender> {
    match (
        config.twilio_account_sid.clone(),
        config.twilio_auth_token.clone(),
        config.twilio_whatsapp_number.clone(),
    ) {
        (Some(account_sid), Some(auth_token), Some(from_number)) => Arc::new(
            TwilioWhatsAppSender::new(http.clone(), account_sid, auth_token, from_number),
        ),
        _ => {
            tracing::warn!("Twilio credentials not configured; WhatsApp delivery disabled");
            Arc::new(DisabledSender)
        }
    }
}
