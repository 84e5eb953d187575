//! Codeforces contest listing via the official REST API.
//!
//! Live-only provider: there is no dependable published schedule to synthesize, so
//! fetch errors propagate to the retry layer.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    error::{provider::ProviderError, Error},
    model::provider::ProviderContest,
    provider::{Provider, FETCH_TIMEOUT},
};

const CONTEST_LIST_URL: &str = "https://codeforces.com/api/contest.list";
const MAX_CONTESTS: usize = 20;

#[derive(Deserialize)]
struct ContestListResponse {
    status: String,
    #[serde(default)]
    result: Vec<CodeforcesContest>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CodeforcesContest {
    id: i64,
    name: String,
    phase: String,
    duration_seconds: i64,
    start_time_seconds: Option<i64>,
}

pub(super) async fn fetch(
    http: &reqwest::Client,
    now: DateTime<Utc>,
) -> Result<Vec<ProviderContest>, Error> {
    fetch_from(http, CONTEST_LIST_URL, now).await
}

async fn fetch_from(
    http: &reqwest::Client,
    url: &str,
    now: DateTime<Utc>,
) -> Result<Vec<ProviderContest>, Error> {
    let platform = Provider::Codeforces.platform();

    let response = http
        .get(url)
        .timeout(FETCH_TIMEOUT)
        .send()
        .await
        .map_err(ProviderError::from)?;

    if !response.status().is_success() {
        return Err(ProviderError::UpstreamStatus {
            platform,
            status: response.status(),
        }
        .into());
    }

    let body: ContestListResponse = response.json().await.map_err(ProviderError::from)?;

    if body.status != "OK" {
        return Err(ProviderError::UnexpectedPayload {
            platform,
            reason: format!("API status {:?}", body.status),
        }
        .into());
    }

    Ok(body
        .result
        .into_iter()
        .filter(|contest| contest.phase == "BEFORE" || contest.phase == "CODING")
        .take(MAX_CONTESTS)
        .map(|contest| normalize(contest, now))
        .collect())
}

fn normalize(contest: CodeforcesContest, now: DateTime<Utc>) -> ProviderContest {
    // Contests without a published start time (e.g. unscheduled gyms) land at "now"
    // and age out with the next retention sweep
    let start_time = contest
        .start_time_seconds
        .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
        .unwrap_or(now);

    ProviderContest {
        url: format!("https://codeforces.com/contest/{}", contest.id),
        external_id: format!("cf-{}", contest.id),
        name: contest.name,
        start_time,
        duration: contest.duration_seconds,
        platform: Provider::Codeforces.platform(),
    }
}
