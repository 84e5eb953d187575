//! Auto-subscription fan-out for platform-level reminder opt-ins.
//!
//! After each sync upsert, users who opted into "auto-remind for platform X" get
//! subscribed to that platform's new contests with reminders computed from their
//! current preferences. Contests already subscribed are skipped entirely so their
//! reminder instances stay exactly as first computed.

use sea_orm::DatabaseConnection;

use crate::{
    data::{profile::ProfileRepository, subscription::SubscriptionRepository},
    error::Error,
    model::preferences::ReminderPreferences,
    provider::platform_key,
    service::reminder::ReminderService,
};

pub struct AutoSubscribeService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AutoSubscribeService<'a> {
    /// Creates a new instance of [`AutoSubscribeService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fans the upserted contest set out to every opted-in profile.
    ///
    /// Platforms missing from the fixed display-name-to-key table never match a
    /// profile's opt-in set, so they are never auto-subscribed.
    ///
    /// # Returns
    /// The number of new subscriptions created
    pub async fn auto_subscribe(
        &self,
        contests: &[entity::contest::Model],
    ) -> Result<usize, Error> {
        if contests.is_empty() {
            return Ok(0);
        }

        let profiles = ProfileRepository::new(self.db)
            .get_auto_reminder_profiles()
            .await?;
        if profiles.is_empty() {
            return Ok(0);
        }

        let subscription_repo = SubscriptionRepository::new(self.db);
        let reminder_service = ReminderService::new(self.db);
        let mut created = 0;

        for profile in &profiles {
            let prefs = ReminderPreferences::from_profile(profile);

            for contest in contests {
                let Some(key) = platform_key(&contest.platform) else {
                    continue;
                };
                if !prefs.auto_platforms.iter().any(|platform| platform == key) {
                    continue;
                }

                let inserted = subscription_repo
                    .create_if_absent(profile.id, contest.id)
                    .await?;
                if inserted == 0 {
                    continue;
                }

                reminder_service
                    .schedule_reminders(profile, contest)
                    .await?;
                created += 1;
            }
        }

        if created > 0 {
            tracing::info!("Auto-subscribed {} new (user, contest) pairs", created);
        }

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use sea_orm::{DatabaseConnection, DbErr, EntityTrait, PaginatorTrait};
    use serde_json::json;

    use crate::{
        data::contest::ContestRepository,
        provider::Provider,
        util::test::{
            mock::{create_profile_with_prefs, mock_provider_contest},
            setup::{create_tables, test_setup},
        },
    };

    use super::AutoSubscribeService;

    async fn setup() -> Result<DatabaseConnection, DbErr> {
        let test = test_setup().await;
        let db = test.state.db;

        create_tables(&db).await?;

        Ok(db)
    }

    /// Only contests on opted-in platforms fan out, with reminders attached
    #[tokio::test]
    async fn subscribes_only_matching_platforms() -> Result<(), DbErr> {
        let db = setup().await?;

        create_profile_with_prefs(
            &db,
            "auth0|alice",
            json!([30]),
            json!({"browser": true}),
            json!(["codeforces"]),
        )
        .await?;

        let now = Utc::now();
        let contests = ContestRepository::new(&db)
            .upsert_many(vec![
                mock_provider_contest(Provider::Codeforces, "Round A", "cf-1", now + Duration::hours(2)),
                mock_provider_contest(Provider::AtCoder, "ABC 401", "ac-abc401", now + Duration::hours(3)),
            ])
            .await?;

        let created = AutoSubscribeService::new(&db)
            .auto_subscribe(&contests)
            .await
            .unwrap();

        assert_eq!(created, 1);

        let subscriptions = entity::prelude::ContestSubscription::find().all(&db).await?;
        assert_eq!(subscriptions.len(), 1);

        let reminders = entity::prelude::Reminder::find().all(&db).await?;
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].contest_id, subscriptions[0].contest_id);

        Ok(())
    }

    /// Re-running the fan-out over the same contests creates nothing new
    #[tokio::test]
    async fn is_idempotent_across_sync_runs() -> Result<(), DbErr> {
        let db = setup().await?;

        create_profile_with_prefs(
            &db,
            "auth0|alice",
            json!([30]),
            json!({"browser": true}),
            json!(["codeforces"]),
        )
        .await?;

        let contests = ContestRepository::new(&db)
            .upsert_many(vec![mock_provider_contest(
                Provider::Codeforces,
                "Round A",
                "cf-1",
                Utc::now() + Duration::hours(2),
            )])
            .await?;

        let service = AutoSubscribeService::new(&db);
        let first = service.auto_subscribe(&contests).await.unwrap();
        let second = service.auto_subscribe(&contests).await.unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 0);

        let reminder_count = entity::prelude::Reminder::find().count(&db).await?;
        assert_eq!(reminder_count, 1);

        Ok(())
    }

    /// Users with an empty opt-in set are never touched
    #[tokio::test]
    async fn skips_profiles_without_opt_ins() -> Result<(), DbErr> {
        let db = setup().await?;

        create_profile_with_prefs(
            &db,
            "auth0|bob",
            json!([30]),
            json!({"browser": true}),
            json!([]),
        )
        .await?;

        let contests = ContestRepository::new(&db)
            .upsert_many(vec![mock_provider_contest(
                Provider::Codeforces,
                "Round A",
                "cf-1",
                Utc::now() + Duration::hours(2),
            )])
            .await?;

        let created = AutoSubscribeService::new(&db)
            .auto_subscribe(&contests)
            .await
            .unwrap();

        assert_eq!(created, 0);

        let subscription_count = entity::prelude::ContestSubscription::find()
            .count(&db)
            .await?;
        assert_eq!(subscription_count, 0);

        Ok(())
    }
}
