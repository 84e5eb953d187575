use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::model::status::reminder_status;

/// One reminder instance to persist, as computed by the scheduler.
pub struct NewReminder {
    pub user_id: i32,
    pub contest_id: i32,
    pub reminder_time: NaiveDateTime,
    pub channel: String,
}

pub struct ReminderRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReminderRepository<'a> {
    /// Creates a new instance of [`ReminderRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Persists a batch of computed reminder instances with status pending
    pub async fn create_many(
        &self,
        reminders: Vec<NewReminder>,
    ) -> Result<Vec<entity::reminder::Model>, DbErr> {
        if reminders.is_empty() {
            return Ok(Vec::new());
        }

        let now = Utc::now().naive_utc();
        let models = reminders
            .into_iter()
            .map(|reminder| entity::reminder::ActiveModel {
                user_id: ActiveValue::Set(reminder.user_id),
                contest_id: ActiveValue::Set(reminder.contest_id),
                reminder_time: ActiveValue::Set(reminder.reminder_time),
                channel: ActiveValue::Set(reminder.channel),
                status: ActiveValue::Set(reminder_status::PENDING.to_string()),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            });

        entity::prelude::Reminder::insert_many(models)
            .exec_with_returning(self.db)
            .await
    }

    /// Pending reminders due at or before `cutoff`, oldest first
    pub async fn get_due_pending(
        &self,
        cutoff: NaiveDateTime,
    ) -> Result<Vec<entity::reminder::Model>, DbErr> {
        entity::prelude::Reminder::find()
            .filter(entity::reminder::Column::Status.eq(reminder_status::PENDING))
            .filter(entity::reminder::Column::ReminderTime.lte(cutoff))
            .order_by_asc(entity::reminder::Column::ReminderTime)
            .all(self.db)
            .await
    }

    /// Transitions a pending reminder to sent; returns affected row count
    pub async fn mark_sent(&self, id: i32) -> Result<u64, DbErr> {
        self.transition(id, reminder_status::SENT).await
    }

    /// Transitions a pending reminder to failed; returns affected row count
    pub async fn mark_failed(&self, id: i32) -> Result<u64, DbErr> {
        self.transition(id, reminder_status::FAILED).await
    }

    /// Deletes pending reminders for a `(user, contest)` pair on unsubscribe.
    ///
    /// Sent and failed rows stay behind as delivery history.
    pub async fn delete_pending_for(
        &self,
        user_id: i32,
        contest_id: i32,
    ) -> Result<DeleteResult, DbErr> {
        entity::prelude::Reminder::delete_many()
            .filter(entity::reminder::Column::UserId.eq(user_id))
            .filter(entity::reminder::Column::ContestId.eq(contest_id))
            .filter(entity::reminder::Column::Status.eq(reminder_status::PENDING))
            .exec(self.db)
            .await
    }

    // The pending guard in the filter makes transitions one-way: a sent or failed
    // reminder can never be updated again.
    async fn transition(&self, id: i32, status: &str) -> Result<u64, DbErr> {
        let result = entity::prelude::Reminder::update_many()
            .col_expr(entity::reminder::Column::Status, Expr::value(status))
            .col_expr(
                entity::reminder::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::reminder::Column::Id.eq(id))
            .filter(entity::reminder::Column::Status.eq(reminder_status::PENDING))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
