use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter,
};

use crate::model::status::sync_status;

pub struct SyncLogRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SyncLogRepository<'a> {
    /// Creates a new instance of [`SyncLogRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens a sync log row with status running
    pub async fn start(&self, sync_type: &str) -> Result<entity::sync_log::Model, DbErr> {
        let log = entity::sync_log::ActiveModel {
            sync_type: ActiveValue::Set(sync_type.to_string()),
            status: ActiveValue::Set(sync_status::RUNNING.to_string()),
            contests_synced: ActiveValue::Set(None),
            error_message: ActiveValue::Set(None),
            started_at: ActiveValue::Set(Utc::now().naive_utc()),
            completed_at: ActiveValue::Set(None),
            ..Default::default()
        };

        log.insert(self.db).await
    }

    /// Closes out a running row: success with no errors, partial otherwise
    pub async fn complete(
        &self,
        id: i32,
        contests_synced: usize,
        errors: &[String],
    ) -> Result<u64, DbErr> {
        let status = if errors.is_empty() {
            sync_status::SUCCESS
        } else {
            sync_status::PARTIAL
        };
        let error_message = if errors.is_empty() {
            None
        } else {
            Some(errors.join("; "))
        };

        self.close(id, status, Some(contests_synced as i32), error_message)
            .await
    }

    /// Closes out a running row as failed with the escaping error's message
    pub async fn fail(&self, id: i32, message: &str) -> Result<u64, DbErr> {
        self.close(id, sync_status::FAILED, None, Some(message.to_string()))
            .await
    }

    async fn close(
        &self,
        id: i32,
        status: &str,
        contests_synced: Option<i32>,
        error_message: Option<String>,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::SyncLog::update_many()
            .col_expr(entity::sync_log::Column::Status, Expr::value(status))
            .col_expr(
                entity::sync_log::Column::ContestsSynced,
                Expr::value(contests_synced),
            )
            .col_expr(
                entity::sync_log::Column::ErrorMessage,
                Expr::value(error_message),
            )
            .col_expr(
                entity::sync_log::Column::CompletedAt,
                Expr::value(Some(Utc::now().naive_utc())),
            )
            .filter(entity::sync_log::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseConnection, DbErr};

    use crate::util::test::setup::{create_tables, test_setup};

    async fn setup() -> Result<DatabaseConnection, DbErr> {
        let test = test_setup().await;
        let db = test.state.db;

        create_tables(&db).await?;

        Ok(db)
    }

    mod lifecycle_tests {
        use sea_orm::{DbErr, EntityTrait};

        use crate::data::sync_log::{tests::setup, SyncLogRepository};

        /// A clean run closes as success with no error message
        #[tokio::test]
        async fn closes_clean_run_as_success() -> Result<(), DbErr> {
            let db = setup().await?;
            let sync_log_repo = SyncLogRepository::new(&db);

            let log = sync_log_repo.start("full").await?;
            assert_eq!(log.status, "running");
            assert!(log.completed_at.is_none());

            sync_log_repo.complete(log.id, 42, &[]).await?;

            let closed = entity::prelude::SyncLog::find_by_id(log.id)
                .one(&db)
                .await?
                .unwrap();
            assert_eq!(closed.status, "success");
            assert_eq!(closed.contests_synced, Some(42));
            assert!(closed.error_message.is_none());
            assert!(closed.completed_at.is_some());

            Ok(())
        }

        /// Provider errors downgrade the run to partial with aggregated text
        #[tokio::test]
        async fn closes_degraded_run_as_partial() -> Result<(), DbErr> {
            let db = setup().await?;
            let sync_log_repo = SyncLogRepository::new(&db);

            let log = sync_log_repo.start("full").await?;
            let errors = vec![
                "CodeForces: returned HTTP 503".to_string(),
                "AtCoder: request timed out".to_string(),
            ];
            sync_log_repo.complete(log.id, 12, &errors).await?;

            let closed = entity::prelude::SyncLog::find_by_id(log.id)
                .one(&db)
                .await?
                .unwrap();
            assert_eq!(closed.status, "partial");
            assert_eq!(
                closed.error_message.as_deref(),
                Some("CodeForces: returned HTTP 503; AtCoder: request timed out")
            );

            Ok(())
        }

        /// An escaping engine error marks the run failed
        #[tokio::test]
        async fn closes_broken_run_as_failed() -> Result<(), DbErr> {
            let db = setup().await?;
            let sync_log_repo = SyncLogRepository::new(&db);

            let log = sync_log_repo.start("full").await?;
            sync_log_repo.fail(log.id, "store unavailable").await?;

            let closed = entity::prelude::SyncLog::find_by_id(log.id)
                .one(&db)
                .await?
                .unwrap();
            assert_eq!(closed.status, "failed");
            assert_eq!(closed.error_message.as_deref(), Some("store unavailable"));
            assert!(closed.contests_synced.is_none());

            Ok(())
        }
    }
}
