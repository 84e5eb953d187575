//! Reminder scheduling and subscription management.
//!
//! Reminder instances are computed once, at subscribe time, from the cartesian
//! product of the user's offsets and enabled channels. Later preference edits
//! never touch rows that already exist.

use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    data::{
        contest::ContestRepository,
        profile::ProfileRepository,
        reminder::{NewReminder, ReminderRepository},
        subscription::SubscriptionRepository,
    },
    error::Error,
    model::preferences::ReminderPreferences,
};

pub struct ReminderService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReminderService<'a> {
    /// Creates a new instance of [`ReminderService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Computes and persists reminder instances for one (user, contest) pair.
    ///
    /// One instance per offset x enabled channel whose `reminder_time` is still in
    /// the future; a contest starting sooner than every offset yields zero rows,
    /// which is expected rather than an error.
    pub async fn schedule_reminders(
        &self,
        profile: &entity::profile::Model,
        contest: &entity::contest::Model,
    ) -> Result<Vec<entity::reminder::Model>, Error> {
        let prefs = ReminderPreferences::from_profile(profile);
        let now = Utc::now().naive_utc();

        let mut instances = Vec::new();
        for offset in &prefs.offsets {
            let reminder_time = contest.start_time - Duration::minutes(*offset);
            if reminder_time <= now {
                continue;
            }

            for channel in &prefs.channels {
                instances.push(NewReminder {
                    user_id: profile.id,
                    contest_id: contest.id,
                    reminder_time,
                    channel: channel.clone(),
                });
            }
        }

        Ok(ReminderRepository::new(self.db)
            .create_many(instances)
            .await?)
    }

    /// Subscribes a user to a contest and schedules their reminders.
    ///
    /// Idempotent on the unique `(user, contest)` pair: re-subscribing reports zero
    /// new reminders and leaves the instances computed the first time untouched.
    ///
    /// # Returns
    /// The number of reminder instances created for a new subscription
    pub async fn subscribe(&self, user_id: i32, contest_id: i32) -> Result<usize, Error> {
        let contest = ContestRepository::new(self.db)
            .get_by_id(contest_id)
            .await?
            .ok_or(Error::ContestNotFound(contest_id))?;
        let profile = ProfileRepository::new(self.db)
            .get_by_id(user_id)
            .await?
            .ok_or(Error::UserNotFound(user_id))?;

        let inserted = SubscriptionRepository::new(self.db)
            .create_if_absent(user_id, contest_id)
            .await?;
        if inserted == 0 {
            return Ok(0);
        }

        let reminders = self.schedule_reminders(&profile, &contest).await?;

        Ok(reminders.len())
    }

    /// Removes a subscription and its pending reminders
    pub async fn unsubscribe(&self, user_id: i32, contest_id: i32) -> Result<(), Error> {
        SubscriptionRepository::new(self.db)
            .delete(user_id, contest_id)
            .await?;
        ReminderRepository::new(self.db)
            .delete_pending_for(user_id, contest_id)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, Utc};
    use sea_orm::{DatabaseConnection, DbErr};
    use serde_json::json;

    use crate::{
        data::contest::ContestRepository,
        provider::Provider,
        util::test::{
            mock::{create_profile_with_prefs, mock_provider_contest},
            setup::{create_tables, test_setup},
        },
    };

    async fn setup() -> Result<DatabaseConnection, DbErr> {
        let test = test_setup().await;
        let db = test.state.db;

        create_tables(&db).await?;

        Ok(db)
    }

    async fn insert_contest(
        db: &DatabaseConnection,
        start_time: DateTime<Utc>,
    ) -> Result<entity::contest::Model, DbErr> {
        let contests = ContestRepository::new(db)
            .upsert_many(vec![mock_provider_contest(
                Provider::Codeforces,
                "Round A",
                "cf-1",
                start_time,
            )])
            .await?;

        Ok(contests.into_iter().next().unwrap())
    }

    mod schedule_reminders_tests {
        use super::*;
        use crate::service::reminder::ReminderService;

        /// Offsets [60,30,0] x {browser} against a contest 90 minutes out -> 3 rows
        #[tokio::test]
        async fn expands_offsets_across_enabled_channels() -> Result<(), DbErr> {
            let db = setup().await?;

            let profile = create_profile_with_prefs(
                &db,
                "auth0|alice",
                json!([60, 30, 0]),
                json!({"browser": true, "email": false}),
                json!([]),
            )
            .await?;
            let contest = insert_contest(&db, Utc::now() + Duration::minutes(90)).await?;

            let reminders = ReminderService::new(&db)
                .schedule_reminders(&profile, &contest)
                .await
                .unwrap();

            assert_eq!(reminders.len(), 3);
            assert!(reminders
                .iter()
                .all(|reminder| reminder.channel == "browser"));
            assert!(reminders
                .iter()
                .all(|reminder| reminder.status == "pending"));

            Ok(())
        }

        /// A contest 10 minutes out with offsets [60,30] -> zero rows
        #[tokio::test]
        async fn skips_offsets_already_in_the_past() -> Result<(), DbErr> {
            let db = setup().await?;

            let profile = create_profile_with_prefs(
                &db,
                "auth0|alice",
                json!([60, 30]),
                json!({"browser": true}),
                json!([]),
            )
            .await?;
            let contest = insert_contest(&db, Utc::now() + Duration::minutes(10)).await?;

            let reminders = ReminderService::new(&db)
                .schedule_reminders(&profile, &contest)
                .await
                .unwrap();

            assert!(reminders.is_empty());

            Ok(())
        }

        /// No generated reminder sits at or before creation time
        #[tokio::test]
        async fn never_schedules_into_the_past() -> Result<(), DbErr> {
            let db = setup().await?;

            let profile = create_profile_with_prefs(
                &db,
                "auth0|alice",
                json!([120, 45, 5]),
                json!({"browser": true, "whatsapp": true}),
                json!([]),
            )
            .await?;
            let contest = insert_contest(&db, Utc::now() + Duration::minutes(50)).await?;

            let now = Utc::now().naive_utc();
            let reminders = ReminderService::new(&db)
                .schedule_reminders(&profile, &contest)
                .await
                .unwrap();

            // 120 is unreachable; 45 and 5 remain, over two channels
            assert_eq!(reminders.len(), 4);
            assert!(reminders
                .iter()
                .all(|reminder| reminder.reminder_time > now));

            Ok(())
        }

        /// No enabled channel falls back to a single baseline channel
        #[tokio::test]
        async fn defaults_to_baseline_channel() -> Result<(), DbErr> {
            let db = setup().await?;

            let profile = create_profile_with_prefs(
                &db,
                "auth0|alice",
                json!([30]),
                json!({"email": false, "browser": false}),
                json!([]),
            )
            .await?;
            let contest = insert_contest(&db, Utc::now() + Duration::minutes(90)).await?;

            let reminders = ReminderService::new(&db)
                .schedule_reminders(&profile, &contest)
                .await
                .unwrap();

            assert_eq!(reminders.len(), 1);
            assert_eq!(reminders[0].channel, "browser");

            Ok(())
        }
    }

    mod subscribe_tests {
        use sea_orm::{EntityTrait, PaginatorTrait};

        use super::*;
        use crate::service::reminder::ReminderService;

        /// Subscribing creates the pair and its reminder instances
        #[tokio::test]
        async fn creates_subscription_and_reminders() -> Result<(), DbErr> {
            let db = setup().await?;

            let profile = create_profile_with_prefs(
                &db,
                "auth0|alice",
                json!([60, 30]),
                json!({"browser": true}),
                json!([]),
            )
            .await?;
            let contest = insert_contest(&db, Utc::now() + Duration::minutes(90)).await?;

            let created = ReminderService::new(&db)
                .subscribe(profile.id, contest.id)
                .await
                .unwrap();

            assert_eq!(created, 2);

            Ok(())
        }

        /// Re-subscribing is a no-op; the original instances stand
        #[tokio::test]
        async fn resubscribe_does_not_duplicate_reminders() -> Result<(), DbErr> {
            let db = setup().await?;

            let profile = create_profile_with_prefs(
                &db,
                "auth0|alice",
                json!([60, 30]),
                json!({"browser": true}),
                json!([]),
            )
            .await?;
            let contest = insert_contest(&db, Utc::now() + Duration::minutes(90)).await?;

            let service = ReminderService::new(&db);
            service.subscribe(profile.id, contest.id).await.unwrap();
            let second = service.subscribe(profile.id, contest.id).await.unwrap();

            assert_eq!(second, 0);
            let reminder_count = entity::prelude::Reminder::find().count(&db).await?;
            assert_eq!(reminder_count, 2);

            Ok(())
        }

        /// Unknown references surface as not-found errors
        #[tokio::test]
        async fn rejects_unknown_contest_or_user() -> Result<(), DbErr> {
            let db = setup().await?;

            let profile = create_profile_with_prefs(
                &db,
                "auth0|alice",
                json!([30]),
                json!({"browser": true}),
                json!([]),
            )
            .await?;

            let service = ReminderService::new(&db);
            assert!(service.subscribe(profile.id, 999).await.is_err());

            let contest = insert_contest(&db, Utc::now() + Duration::minutes(90)).await?;
            assert!(service.subscribe(999, contest.id).await.is_err());

            Ok(())
        }
    }

    mod unsubscribe_tests {
        use sea_orm::{EntityTrait, PaginatorTrait};

        use super::*;
        use crate::service::reminder::ReminderService;

        /// Unsubscribing removes the pair and its pending reminders
        #[tokio::test]
        async fn removes_subscription_and_pending_reminders() -> Result<(), DbErr> {
            let db = setup().await?;

            let profile = create_profile_with_prefs(
                &db,
                "auth0|alice",
                json!([60, 30]),
                json!({"browser": true}),
                json!([]),
            )
            .await?;
            let contest = insert_contest(&db, Utc::now() + Duration::minutes(90)).await?;

            let service = ReminderService::new(&db);
            service.subscribe(profile.id, contest.id).await.unwrap();
            service.unsubscribe(profile.id, contest.id).await.unwrap();

            let subscriptions = entity::prelude::ContestSubscription::find()
                .count(&db)
                .await?;
            let reminders = entity::prelude::Reminder::find().count(&db).await?;
            assert_eq!(subscriptions, 0);
            assert_eq!(reminders, 0);

            Ok(())
        }
    }
}
