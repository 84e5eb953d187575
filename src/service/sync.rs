//! The contest sync engine.
//!
//! One run fans out every registered provider concurrently (each wrapped in the
//! retry layer), merges the surviving lists with source precedence, upserts the
//! result into the canonical store, fans new contests out to auto-reminder users,
//! sweeps contests older than the retention window, and records the whole run in
//! the sync log.
//!
//! Provider failures are isolated per-provider and degrade the run to `partial`;
//! only an error outside that isolation (store unavailable, fan-out failure)
//! marks the run `failed` and propagates to the caller. Partial writes are never
//! rolled back — the upsert is idempotent, so the next run self-corrects.

use chrono::{Duration, Utc};
use futures::future::join_all;
use sea_orm::DatabaseConnection;

use crate::{
    data::{contest::ContestRepository, sync_log::SyncLogRepository},
    error::Error,
    model::provider::ProviderContest,
    provider::Provider,
    service::{auto_subscribe::AutoSubscribeService, merge::merge, retry::RetryContext},
};

pub const SYNC_TYPE_FULL: &str = "full";

/// Contests older than this are swept at the end of each run.
const RETENTION_HOURS: i64 = 24;

/// Outcome of one sync run, as returned to the trigger caller.
pub struct SyncReport {
    pub synced: usize,
    pub errors: Vec<String>,
}

pub struct SyncService<'a> {
    db: &'a DatabaseConnection,
    http: &'a reqwest::Client,
}

impl<'a> SyncService<'a> {
    /// Creates a new instance of [`SyncService`]
    pub fn new(db: &'a DatabaseConnection, http: &'a reqwest::Client) -> Self {
        Self { db, http }
    }

    /// Runs one full fetch -> merge -> upsert -> fan-out -> sweep cycle.
    ///
    /// Idempotent: running twice against identical upstream data produces zero net
    /// row changes.
    pub async fn run_sync(&self) -> Result<SyncReport, Error> {
        let log = SyncLogRepository::new(self.db).start(SYNC_TYPE_FULL).await?;

        tracing::info!("Starting contest sync");
        let outcomes = self.fetch_all().await;

        self.finish(log.id, outcomes).await
    }

    /// Fetches every provider concurrently, each with its own retry budget.
    ///
    /// One slow or failing provider never delays the others beyond its own
    /// retries; outcomes come back per-provider so failures stay isolated.
    async fn fetch_all(&self) -> Vec<(Provider, Result<Vec<ProviderContest>, Error>)> {
        let now = Utc::now();

        join_all(Provider::all().map(|provider| async move {
            let retry = RetryContext::new();
            let http = self.http.clone();

            let result = retry
                .execute_with_retry(provider.platform(), move || {
                    let http = http.clone();
                    Box::pin(async move { provider.fetch(&http, now).await })
                })
                .await;

            (provider, result)
        }))
        .await
    }

    async fn finish(
        &self,
        log_id: i32,
        outcomes: Vec<(Provider, Result<Vec<ProviderContest>, Error>)>,
    ) -> Result<SyncReport, Error> {
        let sync_log_repo = SyncLogRepository::new(self.db);

        let mut lists = Vec::new();
        let mut errors = Vec::new();
        for (provider, outcome) in outcomes {
            match outcome {
                Ok(contests) => {
                    tracing::info!("{}: {} contests", provider.platform(), contests.len());
                    lists.push(contests);
                }
                Err(e) => {
                    tracing::warn!("{} exhausted retries: {}", provider.platform(), e);
                    errors.push(format!("{}: {}", provider.platform(), e));
                }
            }
        }

        match self.commit(lists).await {
            Ok(synced) => {
                sync_log_repo.complete(log_id, synced, &errors).await?;
                tracing::info!(
                    "Sync complete: {} contests synced, {} errors",
                    synced,
                    errors.len()
                );

                Ok(SyncReport { synced, errors })
            }
            Err(e) => {
                if let Err(log_err) = sync_log_repo.fail(log_id, &e.to_string()).await {
                    tracing::error!("Failed to close sync log {}: {}", log_id, log_err);
                }

                Err(e)
            }
        }
    }

    async fn commit(&self, lists: Vec<Vec<ProviderContest>>) -> Result<usize, Error> {
        let contest_repo = ContestRepository::new(self.db);

        let merged = merge(lists);
        let upserted = contest_repo.upsert_many(merged).await?;

        AutoSubscribeService::new(self.db)
            .auto_subscribe(&upserted)
            .await?;

        let cutoff = (Utc::now() - Duration::hours(RETENTION_HOURS)).naive_utc();
        let swept = contest_repo.delete_started_before(cutoff).await?;
        if swept.rows_affected > 0 {
            tracing::info!("Swept {} contests past retention", swept.rows_affected);
        }

        Ok(upserted.len())
    }
}
