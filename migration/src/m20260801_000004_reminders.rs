use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260801_000001_contests::Contests;
use crate::m20260801_000002_profiles::Profiles;

static IDX_REMINDERS_STATUS_REMINDER_TIME: &str = "idx_reminders_status_reminder_time";
static IDX_REMINDERS_USER_CONTEST: &str = "idx_reminders_user_contest";
static FK_REMINDERS_USER_ID: &str = "fk_reminders_user_id";
static FK_REMINDERS_CONTEST_ID: &str = "fk_reminders_contest_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reminders::Table)
                    .if_not_exists()
                    .col(pk_auto(Reminders::Id))
                    .col(integer(Reminders::UserId))
                    .col(integer(Reminders::ContestId))
                    .col(timestamp(Reminders::ReminderTime))
                    .col(string(Reminders::Channel))
                    .col(string(Reminders::Status).default("pending"))
                    .col(timestamp(Reminders::CreatedAt))
                    .col(timestamp(Reminders::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_REMINDERS_STATUS_REMINDER_TIME)
                    .table(Reminders::Table)
                    .col(Reminders::Status)
                    .col(Reminders::ReminderTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_REMINDERS_USER_CONTEST)
                    .table(Reminders::Table)
                    .col(Reminders::UserId)
                    .col(Reminders::ContestId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_REMINDERS_USER_ID)
                    .from_tbl(Reminders::Table)
                    .from_col(Reminders::UserId)
                    .to_tbl(Profiles::Table)
                    .to_col(Profiles::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_REMINDERS_CONTEST_ID)
                    .from_tbl(Reminders::Table)
                    .from_col(Reminders::ContestId)
                    .to_tbl(Contests::Table)
                    .to_col(Contests::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_REMINDERS_CONTEST_ID)
                    .table(Reminders::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_REMINDERS_USER_ID)
                    .table(Reminders::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_REMINDERS_USER_CONTEST)
                    .table(Reminders::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_REMINDERS_STATUS_REMINDER_TIME)
                    .table(Reminders::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Reminders::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Reminders {
    Table,
    Id,
    UserId,
    ContestId,
    ReminderTime,
    Channel,
    Status,
    CreatedAt,
    UpdatedAt,
}
