//! LeetCode contest listing via the GraphQL API, with a schedule fallback.
//!
//! The GraphQL endpoint intermittently rejects unauthenticated clients, so this
//! provider never fails: when the live fetch errors or comes back empty it
//! synthesizes the next weekly contests from LeetCode's fixed schedule
//! (every Sunday 10:30 UTC, 90 minutes).

use chrono::{DateTime, Utc, Weekday};
use serde::Deserialize;

use crate::{
    error::{provider::ProviderError, Error},
    model::provider::ProviderContest,
    provider::{Provider, FETCH_TIMEOUT},
    util::time::upcoming_weekday_at,
};

const GRAPHQL_URL: &str = "https://leetcode.com/graphql/";
const CONTESTS_QUERY: &str = "{ allContests { title titleSlug startTime duration } }";
const MAX_CONTESTS: usize = 8;

const FALLBACK_WEEKS: i64 = 4;
const WEEKLY_START_HOUR: u32 = 10;
const WEEKLY_START_MINUTE: u32 = 30;
const WEEKLY_DURATION_SECS: i64 = 5400;
/// 2023-01-01T00:00:00Z, the week Weekly Contest 330 anchors the numbering
const NUMBERING_ANCHOR_EPOCH: i64 = 1_672_531_200;
const NUMBERING_ANCHOR_CONTEST: i64 = 330;

#[derive(Deserialize)]
struct GraphqlResponse {
    data: Option<AllContests>,
}

#[derive(Deserialize)]
struct AllContests {
    #[serde(rename = "allContests", default)]
    all_contests: Vec<LeetCodeContest>,
}

#[derive(Deserialize)]
struct LeetCodeContest {
    title: String,
    #[serde(rename = "titleSlug")]
    title_slug: String,
    #[serde(rename = "startTime")]
    start_time: i64,
    duration: i64,
}

pub(super) async fn fetch(
    http: &reqwest::Client,
    now: DateTime<Utc>,
) -> Result<Vec<ProviderContest>, Error> {
    match fetch_live(http, GRAPHQL_URL, now).await {
        Ok(contests) if !contests.is_empty() => Ok(contests),
        Ok(_) => {
            tracing::warn!("LeetCode returned no upcoming contests, using schedule fallback");
            Ok(generate_fallback(now))
        }
        Err(e) => {
            tracing::warn!("LeetCode fetch failed, using schedule fallback: {e}");
            Ok(generate_fallback(now))
        }
    }
}

async fn fetch_live(
    http: &reqwest::Client,
    url: &str,
    now: DateTime<Utc>,
) -> Result<Vec<ProviderContest>, Error> {
    let body = serde_json::json!({ "query": CONTESTS_QUERY });

    let response = http
        .post(url)
        .timeout(FETCH_TIMEOUT)
        .json(&body)
        .send()
        .await
        .map_err(ProviderError::from)?;

    if !response.status().is_success() {
        return Err(ProviderError::UpstreamStatus {
            platform: Provider::LeetCode.platform(),
            status: response.status(),
        }
        .into());
    }

    let body: GraphqlResponse = response.json().await.map_err(ProviderError::from)?;
    let contests = body.data.map(|data| data.all_contests).unwrap_or_default();

    Ok(contests
        .into_iter()
        .filter(|contest| contest.start_time > now.timestamp())
        .take(MAX_CONTESTS)
        .filter_map(normalize)
        .collect())
}

fn normalize(contest: LeetCodeContest) -> Option<ProviderContest> {
    Some(ProviderContest {
        url: format!("https://leetcode.com/contest/{}", contest.title_slug),
        external_id: format!("lc-{}", contest.title_slug),
        name: contest.title,
        start_time: DateTime::from_timestamp(contest.start_time, 0)?,
        duration: contest.duration,
        platform: Provider::LeetCode.platform(),
    })
}

/// Synthesizes the next weekly contests from the published schedule.
///
/// Pure date math on `now`; no I/O, cannot fail. A Sunday slot already past at
/// generation time is skipped rather than backdated.
pub(super) fn generate_fallback(now: DateTime<Utc>) -> Vec<ProviderContest> {
    let mut contests = Vec::new();

    for week in 0..FALLBACK_WEEKS {
        let sunday = upcoming_weekday_at(
            now,
            Weekday::Sun,
            WEEKLY_START_HOUR,
            WEEKLY_START_MINUTE,
            week,
            true,
        );
        if sunday <= now {
            continue;
        }

        let number = weekly_contest_number(sunday);
        contests.push(ProviderContest {
            name: format!("Weekly Contest {number}"),
            url: format!("https://leetcode.com/contest/weekly-contest-{number}"),
            start_time: sunday,
            duration: WEEKLY_DURATION_SECS,
            platform: Provider::LeetCode.platform(),
            external_id: format!("lc-weekly-contest-{number}"),
        });
    }

    contests
}

fn weekly_contest_number(sunday: DateTime<Utc>) -> i64 {
    (sunday.timestamp() - NUMBERING_ANCHOR_EPOCH) / (7 * 86400) + NUMBERING_ANCHOR_CONTEST
}
