use sea_orm_migration::{prelude::*, schema::*};

static IDX_PROFILES_USER_ID: &str = "idx_profiles_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(pk_auto(Profiles::Id))
                    .col(string_uniq(Profiles::UserId))
                    .col(string_null(Profiles::FullName))
                    .col(string_null(Profiles::PhoneNumber))
                    .col(json_binary(Profiles::ReminderOffsets))
                    .col(json_binary(Profiles::NotificationChannels))
                    .col(json_binary(Profiles::PreferredPlatforms))
                    .col(json_binary(Profiles::AutoReminderPlatforms))
                    .col(timestamp(Profiles::CreatedAt))
                    .col(timestamp(Profiles::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PROFILES_USER_ID)
                    .table(Profiles::Table)
                    .col(Profiles::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PROFILES_USER_ID)
                    .table(Profiles::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Profiles {
    Table,
    Id,
    UserId,
    FullName,
    PhoneNumber,
    ReminderOffsets,
    NotificationChannels,
    PreferredPlatforms,
    AutoReminderPlatforms,
    CreatedAt,
    UpdatedAt,
}
