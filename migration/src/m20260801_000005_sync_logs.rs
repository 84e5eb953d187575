use sea_orm_migration::{prelude::*, schema::*};

static IDX_SYNC_LOGS_STARTED_AT: &str = "idx_sync_logs_started_at";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SyncLogs::Table)
                    .if_not_exists()
                    .col(pk_auto(SyncLogs::Id))
                    .col(string(SyncLogs::SyncType))
                    .col(string(SyncLogs::Status))
                    .col(integer_null(SyncLogs::ContestsSynced))
                    .col(string_null(SyncLogs::ErrorMessage))
                    .col(timestamp(SyncLogs::StartedAt))
                    .col(timestamp_null(SyncLogs::CompletedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SYNC_LOGS_STARTED_AT)
                    .table(SyncLogs::Table)
                    .col(SyncLogs::StartedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SYNC_LOGS_STARTED_AT)
                    .table(SyncLogs::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SyncLogs::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum SyncLogs {
    Table,
    Id,
    SyncType,
    Status,
    ContestsSynced,
    ErrorMessage,
    StartedAt,
    CompletedAt,
}
