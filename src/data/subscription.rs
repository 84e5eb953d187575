use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, QueryFilter,
};

pub struct SubscriptionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SubscriptionRepository<'a> {
    /// Creates a new instance of [`SubscriptionRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a subscription unless one already exists for the pair.
    ///
    /// Returns the inserted row count: 1 for a new subscription, 0 when the unique
    /// `(user_id, contest_id)` key already had a row (silently ignored, not an error).
    pub async fn create_if_absent(&self, user_id: i32, contest_id: i32) -> Result<u64, DbErr> {
        let subscription = entity::contest_subscription::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            contest_id: ActiveValue::Set(contest_id),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        entity::prelude::ContestSubscription::insert(subscription)
            .on_conflict(
                OnConflict::columns([
                    entity::contest_subscription::Column::UserId,
                    entity::contest_subscription::Column::ContestId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(self.db)
            .await
    }

    /// Get the subscription for a `(user, contest)` pair
    pub async fn get_by_user_and_contest(
        &self,
        user_id: i32,
        contest_id: i32,
    ) -> Result<Option<entity::contest_subscription::Model>, DbErr> {
        entity::prelude::ContestSubscription::find()
            .filter(entity::contest_subscription::Column::UserId.eq(user_id))
            .filter(entity::contest_subscription::Column::ContestId.eq(contest_id))
            .one(self.db)
            .await
    }

    /// Deletes the subscription for a `(user, contest)` pair
    ///
    /// Returns OK regardless of the subscription existing; check
    /// [`DeleteResult::rows_affected`] for the outcome.
    pub async fn delete(&self, user_id: i32, contest_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::ContestSubscription::delete_many()
            .filter(entity::contest_subscription::Column::UserId.eq(user_id))
            .filter(entity::contest_subscription::Column::ContestId.eq(contest_id))
            .exec(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use sea_orm::{DatabaseConnection, DbErr};

    use crate::{
        data::{contest::ContestRepository, profile::ProfileRepository},
        provider::Provider,
        util::test::{
            mock::mock_provider_contest,
            setup::{create_tables, test_setup},
        },
    };

    async fn setup() -> Result<(DatabaseConnection, i32, i32), DbErr> {
        let test = test_setup().await;
        let db = test.state.db;

        create_tables(&db).await?;

        let profile = ProfileRepository::new(&db).create("auth0|alice", None).await?;
        let contests = ContestRepository::new(&db)
            .upsert_many(vec![mock_provider_contest(
                Provider::Codeforces,
                "Round A",
                "cf-1",
                Utc::now() + Duration::hours(12),
            )])
            .await?;

        Ok((db, profile.id, contests[0].id))
    }

    mod create_if_absent_tests {
        use sea_orm::DbErr;

        use crate::data::subscription::{tests::setup, SubscriptionRepository};

        /// First insert reports 1 row, the duplicate reports 0 without erroring
        #[tokio::test]
        async fn ignores_duplicate_pairs() -> Result<(), DbErr> {
            let (db, user_id, contest_id) = setup().await?;
            let subscription_repo = SubscriptionRepository::new(&db);

            let first = subscription_repo.create_if_absent(user_id, contest_id).await?;
            let second = subscription_repo.create_if_absent(user_id, contest_id).await?;

            assert_eq!(first, 1);
            assert_eq!(second, 0);

            Ok(())
        }
    }

    mod delete_tests {
        use sea_orm::DbErr;

        use crate::data::subscription::{tests::setup, SubscriptionRepository};

        /// Deleting removes the pair; deleting again affects nothing
        #[tokio::test]
        async fn deletes_subscription() -> Result<(), DbErr> {
            let (db, user_id, contest_id) = setup().await?;
            let subscription_repo = SubscriptionRepository::new(&db);

            subscription_repo.create_if_absent(user_id, contest_id).await?;

            let result = subscription_repo.delete(user_id, contest_id).await?;
            assert_eq!(result.rows_affected, 1);

            let result = subscription_repo.delete(user_id, contest_id).await?;
            assert_eq!(result.rows_affected, 0);

            let existing = subscription_repo
                .get_by_user_and_contest(user_id, contest_id)
                .await?;
            assert!(existing.is_none());

            Ok(())
        }
    }
}
