use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// Outcome of one full sync run
#[derive(Serialize, Deserialize, ToSchema)]
pub struct SyncReportDto {
    /// Number of contests upserted into the canonical store
    pub synced: usize,
    /// One entry per provider that exhausted its retries
    pub errors: Vec<String>,
}

/// Outcome of one reminder dispatch run
#[derive(Serialize, Deserialize, ToSchema)]
pub struct DispatchReportDto {
    pub sent: usize,
    pub failed: usize,
    pub total: usize,
}

/// A canonical contest as served to the presentation layer
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ContestDto {
    pub id: i32,
    pub name: String,
    pub url: String,
    pub start_time: NaiveDateTime,
    /// Whole seconds
    pub duration: i64,
    pub platform: String,
    pub is_featured: bool,
}

impl From<entity::contest::Model> for ContestDto {
    fn from(contest: entity::contest::Model) -> Self {
        Self {
            id: contest.id,
            name: contest.name,
            url: contest.url,
            start_time: contest.start_time,
            duration: contest.duration,
            platform: contest.platform,
            is_featured: contest.is_featured,
        }
    }
}

/// Request body for registering a user profile
#[derive(Serialize, Deserialize, ToSchema)]
pub struct CreateProfileDto {
    /// External authentication subject
    pub user_id: String,
    pub full_name: Option<String>,
}

/// A user profile with its reminder preferences
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ProfileDto {
    pub id: i32,
    pub user_id: String,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    /// Minutes before contest start
    pub reminder_offsets: Value,
    /// Channel name to enabled flag
    pub notification_channels: Value,
    pub preferred_platforms: Value,
    /// Platform keys with auto-subscription enabled
    pub auto_reminder_platforms: Value,
}

impl From<entity::profile::Model> for ProfileDto {
    fn from(profile: entity::profile::Model) -> Self {
        Self {
            id: profile.id,
            user_id: profile.user_id,
            full_name: profile.full_name,
            phone_number: profile.phone_number,
            reminder_offsets: profile.reminder_offsets,
            notification_channels: profile.notification_channels,
            preferred_platforms: profile.preferred_platforms,
            auto_reminder_platforms: profile.auto_reminder_platforms,
        }
    }
}

/// Partial update of a profile's reminder preferences; absent fields are untouched.
///
/// Existing reminder rows are never recomputed by a preference edit.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct UpdatePreferencesDto {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub reminder_offsets: Option<Value>,
    pub notification_channels: Option<Value>,
    pub preferred_platforms: Option<Value>,
    pub auto_reminder_platforms: Option<Value>,
}

/// Request body for subscribing a user to a contest
#[derive(Serialize, Deserialize, ToSchema)]
pub struct SubscribeDto {
    pub contest_id: i32,
}

/// Outcome of a subscribe request
#[derive(Serialize, Deserialize, ToSchema)]
pub struct SubscribeResultDto {
    /// Reminder instances created for the subscription (0 when already subscribed)
    pub reminders_created: usize,
}

/// Request body for the admin featured-contest toggle
#[derive(Serialize, Deserialize, ToSchema)]
pub struct FeatureContestDto {
    pub is_featured: bool,
}
