use sea_orm_migration::{prelude::*, schema::*};

static IDX_CONTESTS_PLATFORM_EXTERNAL_ID: &str = "idx_contests_platform_external_id";
static IDX_CONTESTS_START_TIME: &str = "idx_contests_start_time";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contests::Table)
                    .if_not_exists()
                    .col(pk_auto(Contests::Id))
                    .col(string(Contests::Name))
                    .col(string(Contests::Url))
                    .col(timestamp(Contests::StartTime))
                    .col(big_integer(Contests::Duration))
                    .col(string(Contests::Platform))
                    .col(string(Contests::ExternalId))
                    .col(boolean(Contests::IsFeatured).default(false))
                    .col(timestamp(Contests::CreatedAt))
                    .col(timestamp(Contests::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CONTESTS_PLATFORM_EXTERNAL_ID)
                    .table(Contests::Table)
                    .col(Contests::Platform)
                    .col(Contests::ExternalId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CONTESTS_START_TIME)
                    .table(Contests::Table)
                    .col(Contests::StartTime)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CONTESTS_START_TIME)
                    .table(Contests::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CONTESTS_PLATFORM_EXTERNAL_ID)
                    .table(Contests::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Contests::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Contests {
    Table,
    Id,
    Name,
    Url,
    StartTime,
    Duration,
    Platform,
    ExternalId,
    IsFeatured,
    CreatedAt,
    UpdatedAt,
}
