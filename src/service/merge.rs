//! Cross-provider contest deduplication.
//!
//! Two entries are "the same contest" iff their names match case- and
//! whitespace-insensitively AND they start at the exact same instant. The key is
//! deliberately strict: near-duplicate titles across sources, or the same contest
//! listed with slightly different start times, are NOT merged. That is a known
//! limitation — do not widen the key without re-deriving the false-merge risk.

use std::collections::HashSet;

use crate::model::provider::ProviderContest;

/// Merges per-provider contest lists into one deduplicated list.
///
/// Input order encodes source precedence: on a duplicate key the entry from the
/// earlier list wins. Output is sorted ascending by start time; ties keep input
/// order.
pub fn merge(lists: Vec<Vec<ProviderContest>>) -> Vec<ProviderContest> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for list in lists {
        for contest in list {
            if seen.insert(contest_key(&contest)) {
                merged.push(contest);
            }
        }
    }

    merged.sort_by_key(|contest| contest.start_time);

    merged
}

fn contest_key(contest: &ProviderContest) -> String {
    format!(
        "{}|{}",
        contest.name.trim().to_lowercase(),
        contest.start_time.to_rfc3339()
    )
}
