use crate::error::config::ConfigError;

/// Runtime configuration loaded from the environment.
///
/// Twilio credentials are optional: without them WhatsApp reminders are skipped at
/// dispatch time (logged, still marked sent) while every other channel keeps working.
pub struct Config {
    pub listen_addr: String,
    pub database_url: String,
    pub twilio_account_sid: Option<String>,
    pub twilio_auth_token: Option<String>,
    pub twilio_whatsapp_number: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            database_url: require_env("DATABASE_URL")?,
            twilio_account_sid: std::env::var("TWILIO_ACCOUNT_SID").ok(),
            twilio_auth_token: std::env::var("TWILIO_AUTH_TOKEN").ok(),
            twilio_whatsapp_number: std::env::var("TWILIO_WHATSAPP_NUMBER").ok(),
        })
    }
}

fn require_env(var: &str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
}
