//! AtCoder contest listing via the community-maintained AtCoder Problems mirror.
//!
//! Live-only provider; errors propagate to the retry layer.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    error::{provider::ProviderError, Error},
    model::provider::ProviderContest,
    provider::{Provider, FETCH_TIMEOUT},
};

const CONTESTS_URL: &str = "https://kenkoooo.com/atcoder/resources/contests.json";
const MAX_CONTESTS: usize = 10;

#[derive(Deserialize)]
struct AtCoderContest {
    id: String,
    title: String,
    start_epoch_second: i64,
    duration_second: i64,
}

pub(super) async fn fetch(
    http: &reqwest::Client,
    now: DateTime<Utc>,
) -> Result<Vec<ProviderContest>, Error> {
    fetch_from(http, CONTESTS_URL, now).await
}

async fn fetch_from(
    http: &reqwest::Client,
    url: &str,
    now: DateTime<Utc>,
) -> Result<Vec<ProviderContest>, Error> {
    let response = http
        .get(url)
        .timeout(FETCH_TIMEOUT)
        .send()
        .await
        .map_err(ProviderError::from)?;

    if !response.status().is_success() {
        return Err(ProviderError::UpstreamStatus {
            platform: Provider::AtCoder.platform(),
            status: response.status(),
        }
        .into());
    }

    let contests: Vec<AtCoderContest> = response.json().await.map_err(ProviderError::from)?;

    Ok(contests
        .into_iter()
        .filter(|contest| contest.start_epoch_second > now.timestamp())
        .take(MAX_CONTESTS)
        .filter_map(normalize)
        .collect())
}

fn normalize(contest: AtCoderContest) -> Option<ProviderContest> {
    Some(ProviderContest {
        url: format!("https://atcoder.jp/contests/{}", contest.id),
        external_id: format!("ac-{}", contest.id),
        name: contest.title,
        start_time: DateTime::from_timestamp(contest.start_epoch_second, 0)?,
        duration: contest.duration_second,
        platform: Provider::AtCoder.platform(),
    })
}
