use serde_json::Value;

use crate::model::status::channel;

/// Default reminder offsets (minutes before start) for new or unset profiles.
pub const DEFAULT_REMINDER_OFFSETS: [i64; 2] = [30, 60];

/// Channel a reminder falls back to when a profile has no channel enabled.
pub const BASELINE_CHANNEL: &str = channel::BROWSER;

/// Default notification channel map for new profiles.
pub fn default_notification_channels() -> Value {
    serde_json::json!({
        channel::EMAIL: true,
        channel::BROWSER: true,
        channel::WHATSAPP: false,
    })
}

/// A profile's reminder preferences parsed out of its JSON columns.
///
/// Parsing is lenient: malformed or missing values degrade to the defaults the
/// dashboard would have written, never to an error.
pub struct ReminderPreferences {
    /// Minutes before contest start, deduplicated, largest first
    pub offsets: Vec<i64>,
    /// Enabled channel names, alphabetical for deterministic row order
    pub channels: Vec<String>,
    /// Platform keys the user auto-subscribes to
    pub auto_platforms: Vec<String>,
}

impl ReminderPreferences {
    pub fn from_profile(profile: &entity::profile::Model) -> Self {
        Self {
            offsets: parse_offsets(&profile.reminder_offsets),
            channels: parse_channels(&profile.notification_channels),
            auto_platforms: parse_string_array(&profile.auto_reminder_platforms),
        }
    }
}

fn parse_offsets(value: &Value) -> Vec<i64> {
    let mut offsets: Vec<i64> = match value.as_array() {
        Some(entries) => entries
            .iter()
            .filter_map(Value::as_i64)
            .filter(|offset| *offset >= 0)
            .collect(),
        None => Vec::new(),
    };

    if offsets.is_empty() {
        offsets = DEFAULT_REMINDER_OFFSETS.to_vec();
    }

    offsets.sort_unstable_by(|a, b| b.cmp(a));
    offsets.dedup();
    offsets
}

fn parse_channels(value: &Value) -> Vec<String> {
    let mut channels: Vec<String> = match value.as_object() {
        Some(map) => map
            .iter()
            .filter(|(_, enabled)| enabled.as_bool().unwrap_or(false))
            .map(|(name, _)| name.clone())
            .collect(),
        None => Vec::new(),
    };

    if channels.is_empty() {
        channels.push(BASELINE_CHANNEL.to_string());
    }

    channels.sort_unstable();
    channels
}

pub(crate) fn parse_string_array(value: &Value) -> Vec<String> {
    match value.as_array() {
        Some(entries) => entries
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}
