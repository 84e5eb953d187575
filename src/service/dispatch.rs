//! The reminder dispatch engine.
//!
//! One run scans pending reminders due inside a fixed lookahead window and
//! transitions each to `sent` or `failed` exactly once. Message-based channels
//! (WhatsApp) go through the notification sender; browser and email reminders are
//! delivered by the presentation layer, so issuing them here is fire-and-forget.
//! One bad reminder never aborts the batch.

use chrono::{DateTime, Duration, TimeZone, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    data::{contest::ContestRepository, profile::ProfileRepository, reminder::ReminderRepository},
    error::{notify::NotifyError, Error},
    model::status::channel,
    service::notify::{NotificationSender, ReminderMessage},
    util::time::{format_time_until, minutes_until},
};

/// Compensates for dispatch-interval granularity; reminders due this many
/// minutes ahead are picked up in the current run.
const LOOKAHEAD_MINUTES: i64 = 5;

/// Outcome of one dispatch run, as returned to the trigger caller.
pub struct DispatchReport {
    pub sent: usize,
    pub failed: usize,
    pub total: usize,
}

pub struct DispatchService<'a> {
    db: &'a DatabaseConnection,
    notifier: &'a dyn NotificationSender,
}

impl<'a> DispatchService<'a> {
    /// Creates a new instance of [`DispatchService`]
    pub fn new(db: &'a DatabaseConnection, notifier: &'a dyn NotificationSender) -> Self {
        Self { db, notifier }
    }

    /// Delivers every due pending reminder and transitions its status.
    ///
    /// Reminders are processed sequentially; each transitions at most once per
    /// run and never back to pending. Intended to run on a recurring external
    /// timer, one run at a time.
    pub async fn dispatch_due(&self) -> Result<DispatchReport, Error> {
        let reminder_repo = ReminderRepository::new(self.db);

        let now = Utc::now();
        let cutoff = (now + Duration::minutes(LOOKAHEAD_MINUTES)).naive_utc();
        let due = reminder_repo.get_due_pending(cutoff).await?;

        if due.is_empty() {
            tracing::debug!("No pending reminders due");
            return Ok(DispatchReport {
                sent: 0,
                failed: 0,
                total: 0,
            });
        }

        tracing::info!("Found {} reminders to process", due.len());

        let total = due.len();
        let mut sent = 0;
        let mut failed = 0;

        for reminder in due {
            match self.deliver(&reminder, now).await {
                Ok(()) => {
                    reminder_repo.mark_sent(reminder.id).await?;
                    sent += 1;
                }
                Err(e) => {
                    tracing::warn!("Reminder {} failed: {}", reminder.id, e);
                    if let Err(mark_err) = reminder_repo.mark_failed(reminder.id).await {
                        tracing::error!(
                            "Failed to mark reminder {} as failed: {}",
                            reminder.id,
                            mark_err
                        );
                    }
                    failed += 1;
                }
            }
        }

        tracing::info!("Reminders processed: {} sent, {} failed", sent, failed);

        Ok(DispatchReport {
            sent,
            failed,
            total,
        })
    }

    /// Issues the delivery attempt for one reminder.
    ///
    /// An `Err` here means a missing prerequisite (contest row vanished, no
    /// contact address) — the reminder becomes `failed`. A transport rejection
    /// after the attempt was issued is only logged: the reminder still counts as
    /// sent, matching the fire-and-forget contract of out-of-band channels.
    async fn deliver(
        &self,
        reminder: &entity::reminder::Model,
        now: DateTime<Utc>,
    ) -> Result<(), Error> {
        let contest = ContestRepository::new(self.db)
            .get_by_id(reminder.contest_id)
            .await?
            .ok_or(Error::ContestNotFound(reminder.contest_id))?;

        if reminder.channel == channel::WHATSAPP {
            let profile = ProfileRepository::new(self.db)
                .get_by_id(reminder.user_id)
                .await?
                .ok_or(Error::UserNotFound(reminder.user_id))?;
            let recipient = profile
                .phone_number
                .clone()
                .ok_or(NotifyError::MissingPhoneNumber(profile.id))?;

            let start_time = Utc.from_utc_datetime(&contest.start_time);
            let message = ReminderMessage {
                channel: reminder.channel.clone(),
                recipient,
                contest_name: contest.name.clone(),
                platform: contest.platform.clone(),
                time_until: format!(
                    "Starts in {}",
                    format_time_until(minutes_until(start_time, now))
                ),
            };

            if let Err(e) = self.notifier.send(&message).await {
                tracing::error!(
                    "Delivery for reminder {} failed after dispatch: {}",
                    reminder.id,
                    e
                );
            }
        }
        // Browser and email reminders are picked up by the presentation layer;
        // marking them sent is the whole delivery from this engine's side.

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use sea_orm::{DatabaseConnection, DbErr, EntityTrait};

    use crate::{
        data::{
            contest::ContestRepository,
            profile::ProfileRepository,
            reminder::{NewReminder, ReminderRepository},
        },
        model::api::UpdatePreferencesDto,
        provider::Provider,
        util::test::{
            mock::{mock_provider_contest, FailingSender, RecordingSender},
            setup::{create_tables, test_setup},
        },
    };

    use super::*;

    async fn setup() -> Result<(DatabaseConnection, i32, entity::contest::Model), DbErr> {
        let test = test_setup().await;
        let db = test.state.db;

        create_tables(&db).await?;

        let profile_repo = ProfileRepository::new(&db);
        let profile = profile_repo.create("auth0|alice", None).await?;
        profile_repo
            .update_preferences(
                profile.id,
                UpdatePreferencesDto {
                    full_name: None,
                    phone_number: Some("+15551234567".to_string()),
                    reminder_offsets: None,
                    notification_channels: None,
                    preferred_platforms: None,
                    auto_reminder_platforms: None,
                },
            )
            .await?;

        let contests = ContestRepository::new(&db)
            .upsert_many(vec![mock_provider_contest(
                Provider::Codeforces,
                "Round A",
                "cf-1",
                Utc::now() + Duration::minutes(30),
            )])
            .await?;

        Ok((db, profile.id, contests.into_iter().next().unwrap()))
    }

    fn due_reminder(user_id: i32, contest_id: i32, channel: &str) -> NewReminder {
        NewReminder {
            user_id,
            contest_id,
            reminder_time: (Utc::now() + Duration::minutes(2)).naive_utc(),
            channel: channel.to_string(),
        }
    }

    /// Browser reminders mark sent without touching the message sender
    #[tokio::test]
    async fn browser_reminders_are_fire_and_forget() -> Result<(), DbErr> {
        let (db, user_id, contest) = setup().await?;
        let reminder_repo = ReminderRepository::new(&db);

        reminder_repo
            .create_many(vec![due_reminder(user_id, contest.id, "browser")])
            .await?;

        let sender = RecordingSender::default();
        let report = DispatchService::new(&db, &sender)
            .dispatch_due()
            .await
            .unwrap();

        assert_eq!(report.sent, 1);
        assert_eq!(report.failed, 0);
        assert!(sender.sent.lock().unwrap().is_empty());

        Ok(())
    }

    /// WhatsApp reminders carry contest name, platform, and a lead string
    #[tokio::test]
    async fn whatsapp_reminders_reach_the_sender() -> Result<(), DbErr> {
        let (db, user_id, contest) = setup().await?;
        let reminder_repo = ReminderRepository::new(&db);

        reminder_repo
            .create_many(vec![due_reminder(user_id, contest.id, "whatsapp")])
            .await?;

        let sender = RecordingSender::default();
        let report = DispatchService::new(&db, &sender)
            .dispatch_due()
            .await
            .unwrap();

        assert_eq!(report.sent, 1);
        let messages = sender.sent.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].recipient, "+15551234567");
        assert_eq!(messages[0].contest_name, "Round A");
        assert_eq!(messages[0].platform, "CodeForces");
        assert!(messages[0].time_until.starts_with("Starts in"));

        Ok(())
    }

    /// A transport rejection is logged but the attempt still counts as sent
    #[tokio::test]
    async fn transport_rejection_still_marks_sent() -> Result<(), DbErr> {
        let (db, user_id, contest) = setup().await?;
        let reminder_repo = ReminderRepository::new(&db);

        let created = reminder_repo
            .create_many(vec![due_reminder(user_id, contest.id, "whatsapp")])
            .await?;

        let report = DispatchService::new(&db, &FailingSender)
            .dispatch_due()
            .await
            .unwrap();

        assert_eq!(report.sent, 1);
        let reminder = entity::prelude::Reminder::find_by_id(created[0].id)
            .one(&db)
            .await?
            .unwrap();
        assert_eq!(reminder.status, "sent");

        Ok(())
    }

    /// A WhatsApp reminder without a phone number fails without a delivery attempt
    #[tokio::test]
    async fn missing_phone_number_fails_the_reminder() -> Result<(), DbErr> {
        let (db, _, contest) = setup().await?;
        let reminder_repo = ReminderRepository::new(&db);

        let no_phone = ProfileRepository::new(&db).create("auth0|bob", None).await?;
        let created = reminder_repo
            .create_many(vec![due_reminder(no_phone.id, contest.id, "whatsapp")])
            .await?;

        let sender = RecordingSender::default();
        let report = DispatchService::new(&db, &sender)
            .dispatch_due()
            .await
            .unwrap();

        assert_eq!(report.failed, 1);
        assert!(sender.sent.lock().unwrap().is_empty());

        let reminder = entity::prelude::Reminder::find_by_id(created[0].id)
            .one(&db)
            .await?
            .unwrap();
        assert_eq!(reminder.status, "failed");

        Ok(())
    }

    /// One failing reminder in the middle of a batch never aborts the rest
    #[tokio::test]
    async fn one_bad_reminder_never_aborts_the_batch() -> Result<(), DbErr> {
        let (db, user_id, contest) = setup().await?;
        let reminder_repo = ReminderRepository::new(&db);

        let no_phone = ProfileRepository::new(&db).create("auth0|bob", None).await?;
        reminder_repo
            .create_many(vec![
                due_reminder(user_id, contest.id, "browser"),
                due_reminder(no_phone.id, contest.id, "whatsapp"),
                due_reminder(user_id, contest.id, "whatsapp"),
            ])
            .await?;

        let sender = RecordingSender::default();
        let report = DispatchService::new(&db, &sender)
            .dispatch_due()
            .await
            .unwrap();

        assert_eq!(report.total, 3);
        assert_eq!(report.sent, 2);
        assert_eq!(report.failed, 1);

        Ok(())
    }

    /// A contest row that vanished before dispatch fails the reminder without a
    /// delivery attempt
    #[tokio::test]
    async fn vanished_contest_fails_delivery() -> Result<(), DbErr> {
        let (db, user_id, _) = setup().await?;

        let orphan = entity::reminder::Model {
            id: 1,
            user_id,
            contest_id: 999,
            reminder_time: (Utc::now() + Duration::minutes(2)).naive_utc(),
            channel: "whatsapp".to_string(),
            status: "pending".to_string(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        };

        let sender = RecordingSender::default();
        let result = DispatchService::new(&db, &sender)
            .deliver(&orphan, Utc::now())
            .await;

        assert!(matches!(result, Err(Error::ContestNotFound(999))));
        assert!(sender.sent.lock().unwrap().is_empty());

        Ok(())
    }

    /// Reminders outside the lookahead window stay pending
    #[tokio::test]
    async fn respects_lookahead_window() -> Result<(), DbErr> {
        let (db, user_id, contest) = setup().await?;
        let reminder_repo = ReminderRepository::new(&db);

        reminder_repo
            .create_many(vec![NewReminder {
                user_id,
                contest_id: contest.id,
                reminder_time: (Utc::now() + Duration::minutes(20)).naive_utc(),
                channel: "browser".to_string(),
            }])
            .await?;

        let sender = RecordingSender::default();
        let report = DispatchService::new(&db, &sender)
            .dispatch_due()
            .await
            .unwrap();

        assert_eq!(report.total, 0);

        Ok(())
    }
}
