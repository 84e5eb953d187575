use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260801_000001_contests::Contests;
use crate::m20260801_000002_profiles::Profiles;

static IDX_CONTEST_SUBSCRIPTIONS_USER_CONTEST: &str = "idx_contest_subscriptions_user_contest";
static FK_CONTEST_SUBSCRIPTIONS_USER_ID: &str = "fk_contest_subscriptions_user_id";
static FK_CONTEST_SUBSCRIPTIONS_CONTEST_ID: &str = "fk_contest_subscriptions_contest_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContestSubscriptions::Table)
                    .if_not_exists()
                    .col(pk_auto(ContestSubscriptions::Id))
                    .col(integer(ContestSubscriptions::UserId))
                    .col(integer(ContestSubscriptions::ContestId))
                    .col(timestamp(ContestSubscriptions::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CONTEST_SUBSCRIPTIONS_USER_CONTEST)
                    .table(ContestSubscriptions::Table)
                    .col(ContestSubscriptions::UserId)
                    .col(ContestSubscriptions::ContestId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_CONTEST_SUBSCRIPTIONS_USER_ID)
                    .from_tbl(ContestSubscriptions::Table)
                    .from_col(ContestSubscriptions::UserId)
                    .to_tbl(Profiles::Table)
                    .to_col(Profiles::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_CONTEST_SUBSCRIPTIONS_CONTEST_ID)
                    .from_tbl(ContestSubscriptions::Table)
                    .from_col(ContestSubscriptions::ContestId)
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
                    .name(FK_CONTEST_SUBSCRIPTIONS_CONTEST_ID)
                    .table(ContestSubscriptions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_CONTEST_SUBSCRIPTIONS_USER_ID)
                    .table(ContestSubscriptions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CONTEST_SUBSCRIPTIONS_USER_CONTEST)
                    .table(ContestSubscriptions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ContestSubscriptions::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ContestSubscriptions {
    Table,
    Id,
    UserId,
    ContestId,
    CreatedAt,
}
