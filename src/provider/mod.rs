//! Upstream contest providers.
//!
//! Each variant of [`Provider`] is one upstream listing source with its own wire
//! format, filtering rules, and normalization into [`ProviderContest`]. The set is
//! deliberately closed: adding a platform means adding a variant and its module,
//! not branching existing code. `Provider::all()` order doubles as merge
//! precedence — earlier providers win on duplicate contests.
//!
//! Sources without a dependable live API (LeetCode, CodeChef) carry a
//! deterministic fallback generator for their known weekly schedule, so only the
//! live-only providers (Codeforces, AtCoder) can ever surface a fetch error.

pub mod atcoder;
pub mod codechef;
pub mod codeforces;
pub mod leetcode;

use chrono::{DateTime, Utc};

use crate::{error::Error, model::provider::ProviderContest};

/// Deadline for a single upstream request; exceeding it is a fetch failure
/// subject to retry.
pub const FETCH_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// One upstream contest listing source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Codeforces,
    AtCoder,
    LeetCode,
    CodeChef,
}

impl Provider {
    /// Every registered provider, in merge precedence order.
    pub fn all() -> [Provider; 4] {
        [
            Provider::Codeforces,
            Provider::AtCoder,
            Provider::LeetCode,
            Provider::CodeChef,
        ]
    }

    /// Canonical platform display name as stored on contest rows.
    pub fn platform(&self) -> &'static str {
        match self {
            Provider::Codeforces => "CodeForces",
            Provider::AtCoder => "AtCoder",
            Provider::LeetCode => "LeetCode",
            Provider::CodeChef => "CodeChef",
        }
    }

    /// Lowercase platform key as stored in profile preference arrays.
    pub fn platform_key(&self) -> &'static str {
        match self {
            Provider::Codeforces => "codeforces",
            Provider::AtCoder => "atcoder",
            Provider::LeetCode => "leetcode",
            Provider::CodeChef => "codechef",
        }
    }

    /// Fetches and normalizes this provider's upcoming contests.
    ///
    /// Providers with a fallback generator recover internally and always return
    /// `Ok`; live-only providers raise so the retry layer can re-attempt.
    pub async fn fetch(
        &self,
        http: &reqwest::Client,
        now: DateTime<Utc>,
    ) -> Result<Vec<ProviderContest>, Error> {
        match self {
            Provider::Codeforces => codeforces::fetch(http, now).await,
            Provider::AtCoder => atcoder::fetch(http, now).await,
            Provider::LeetCode => leetcode::fetch(http, now).await,
            Provider::CodeChef => codechef::fetch(http, now).await,
        }
    }
}

/// Maps a canonical platform display name to its preference key.
///
/// Platforms absent from this table are never auto-subscribed.
pub fn platform_key(platform: &str) -> Option<&'static str> {
    Provider::all()
        .into_iter()
        .find(|provider| provider.platform() == platform)
        .map(|provider| provider.platform_key())
}
