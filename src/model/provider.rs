use chrono::{DateTime, Utc};

/// A contest as normalized by one upstream provider.
///
/// Ephemeral shape that exists only between a provider fetch and the merge/upsert
/// steps of a sync run; never persisted directly.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderContest {
    pub name: String,
    pub url: String,
    pub start_time: DateTime<Utc>,
    /// Whole seconds
    pub duration: i64,
    /// Canonical platform display name
    pub platform: &'static str,
    /// Stable upstream identifier, prefixed per platform (e.g. `cf-2104`)
    pub external_id: String,
}
