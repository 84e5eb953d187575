//! CodeChef contest listing via the public contest API, with a Starters fallback.
//!
//! The API sits behind aggressive bot protection, so this provider never fails:
//! when the live fetch errors or comes back empty it synthesizes the next
//! Starters rounds from CodeChef's fixed schedule (every Wednesday 14:30 UTC,
//! 2 hours).

use chrono::{DateTime, NaiveDateTime, Utc, Weekday};
use serde::Deserialize;

use crate::{
    error::{provider::ProviderError, Error},
    model::provider::ProviderContest,
    provider::{Provider, FETCH_TIMEOUT},
    util::time::upcoming_weekday_at,
};

const CONTESTS_URL: &str =
    "https://www.codechef.com/api/list/contests/all?sort_by=START&sorting_order=asc&offset=0&mode=all";
const MAX_CONTESTS: usize = 10;
const DEFAULT_DURATION_MINUTES: i64 = 120;

const FALLBACK_WEEKS: i64 = 4;
const STARTERS_HOUR: u32 = 14;
const STARTERS_MINUTE: u32 = 30;
const STARTERS_DURATION_SECS: i64 = 7200;
const STARTERS_BASE_NUMBER: i64 = 170;

#[derive(Deserialize)]
struct ContestListResponse {
    #[serde(default)]
    future_contests: Vec<CodeChefContest>,
    #[serde(default)]
    present_contests: Vec<CodeChefContest>,
}

#[derive(Deserialize)]
struct CodeChefContest {
    contest_code: String,
    contest_name: String,
    contest_start_date_iso: Option<String>,
    contest_start_date: Option<String>,
    /// Minutes, served as a string
    contest_duration: Option<String>,
}

pub(super) async fn fetch(
    http: &reqwest::Client,
    now: DateTime<Utc>,
) -> Result<Vec<ProviderContest>, Error> {
    match fetch_live(http, CONTESTS_URL).await {
        Ok(contests) if !contests.is_empty() => Ok(contests),
        Ok(_) => {
            tracing::warn!("CodeChef returned no upcoming contests, using schedule fallback");
            Ok(generate_fallback(now))
        }
        Err(e) => {
            tracing::warn!("CodeChef fetch failed, using schedule fallback: {e}");
            Ok(generate_fallback(now))
        }
    }
}

async fn fetch_live(
    http: &reqwest::Client,
    url: &str,
) -> Result<Vec<ProviderContest>, Error> {
    let response = http
        .get(url)
        .timeout(FETCH_TIMEOUT)
        .send()
        .await
        .map_err(ProviderError::from)?;

    if !response.status().is_success() {
        return Err(ProviderError::UpstreamStatus {
            platform: Provider::CodeChef.platform(),
            status: response.status(),
        }
        .into());
    }

    let body: ContestListResponse = response.json().await.map_err(ProviderError::from)?;

    // Running rounds follow upcoming ones, matching how subscribers care about them
    let upcoming = body
        .future_contests
        .into_iter()
        .chain(body.present_contests);

    Ok(upcoming
        .take(MAX_CONTESTS)
        .filter_map(normalize)
        .collect())
}

fn normalize(contest: CodeChefContest) -> Option<ProviderContest> {
    let start_time = parse_start_date(&contest)?;
    let duration_minutes = contest
        .contest_duration
        .as_deref()
        .and_then(|minutes| minutes.parse::<i64>().ok())
        .unwrap_or(DEFAULT_DURATION_MINUTES);

    Some(ProviderContest {
        url: format!("https://www.codechef.com/{}", contest.contest_code),
        external_id: format!("cc-{}", contest.contest_code),
        name: contest.contest_name,
        start_time,
        duration: duration_minutes * 60,
        platform: Provider::CodeChef.platform(),
    })
}

/// CodeChef serves both an ISO start date and a locale-formatted one; entries
/// where neither parses are skipped rather than failing the whole list.
fn parse_start_date(contest: &CodeChefContest) -> Option<DateTime<Utc>> {
    if let Some(iso) = contest.contest_start_date_iso.as_deref() {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(iso) {
            return Some(parsed.with_timezone(&Utc));
        }
    }

    let raw = contest.contest_start_date.as_deref()?;
    NaiveDateTime::parse_from_str(raw, "%d %b %Y %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Synthesizes the next Starters rounds from the published schedule.
///
/// Pure date math on `now`; no I/O, cannot fail. A Wednesday "today" rolls to
/// next week, matching how the schedule is announced.
pub(super) fn generate_fallback(now: DateTime<Utc>) -> Vec<ProviderContest> {
    let mut contests = Vec::new();

    for week in 0..FALLBACK_WEEKS {
        let wednesday = upcoming_weekday_at(
            now,
            Weekday::Wed,
            STARTERS_HOUR,
            STARTERS_MINUTE,
            week,
            false,
        );
        if wednesday <= now {
            continue;
        }

        let number = STARTERS_BASE_NUMBER + week;
        contests.push(ProviderContest {
            name: format!("Starters {number}"),
            url: "https://www.codechef.com/contests".to_string(),
            start_time: wednesday,
            duration: STARTERS_DURATION_SECS,
            platform: Provider::CodeChef.platform(),
            external_id: format!("cc-starters-{number}"),
        });
    }

    contests
}
