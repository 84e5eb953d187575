use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};
use serde_json::json;

use crate::{
    model::{api::UpdatePreferencesDto, preferences},
    provider::Provider,
};

pub struct ProfileRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProfileRepository<'a> {
    /// Creates a new instance of [`ProfileRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a profile with the dashboard's default preferences
    pub async fn create(
        &self,
        user_id: &str,
        full_name: Option<String>,
    ) -> Result<entity::profile::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let preferred: Vec<&str> = Provider::all()
            .into_iter()
            .map(|provider| provider.platform_key())
            .collect();

        let profile = entity::profile::ActiveModel {
            user_id: ActiveValue::Set(user_id.to_string()),
            full_name: ActiveValue::Set(full_name),
            phone_number: ActiveValue::Set(None),
            reminder_offsets: ActiveValue::Set(json!(preferences::DEFAULT_REMINDER_OFFSETS)),
            notification_channels: ActiveValue::Set(preferences::default_notification_channels()),
            preferred_platforms: ActiveValue::Set(json!(preferred)),
            auto_reminder_platforms: ActiveValue::Set(json!([])),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        profile.insert(self.db).await
    }

    /// Get a profile using its store-assigned ID
    pub async fn get_by_id(&self, id: i32) -> Result<Option<entity::profile::Model>, DbErr> {
        entity::prelude::Profile::find_by_id(id).one(self.db).await
    }

    /// Get a profile using its external authentication subject
    pub async fn get_by_user_id(
        &self,
        user_id: &str,
    ) -> Result<Option<entity::profile::Model>, DbErr> {
        entity::prelude::Profile::find()
            .filter(entity::profile::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    /// Applies a partial preference update; absent fields keep their values.
    ///
    /// Only the profile row is touched — reminder rows computed from earlier
    /// preferences are intentionally left as they were.
    pub async fn update_preferences(
        &self,
        profile_id: i32,
        update: UpdatePreferencesDto,
    ) -> Result<Option<entity::profile::Model>, DbErr> {
        let Some(profile) = self.get_by_id(profile_id).await? else {
            return Ok(None);
        };

        let mut active: entity::profile::ActiveModel = profile.into();

        if let Some(full_name) = update.full_name {
            active.full_name = ActiveValue::Set(Some(full_name));
        }
        if let Some(phone_number) = update.phone_number {
            active.phone_number = ActiveValue::Set(Some(phone_number));
        }
        if let Some(reminder_offsets) = update.reminder_offsets {
            active.reminder_offsets = ActiveValue::Set(reminder_offsets);
        }
        if let Some(notification_channels) = update.notification_channels {
            active.notification_channels = ActiveValue::Set(notification_channels);
        }
        if let Some(preferred_platforms) = update.preferred_platforms {
            active.preferred_platforms = ActiveValue::Set(preferred_platforms);
        }
        if let Some(auto_reminder_platforms) = update.auto_reminder_platforms {
            active.auto_reminder_platforms = ActiveValue::Set(auto_reminder_platforms);
        }
        active.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        active.update(self.db).await.map(Some)
    }

    /// Profiles that opted into auto-reminders for at least one platform.
    ///
    /// The platform set lives in a JSON column, so the non-empty check happens
    /// client-side; the profiles table stays small enough for that.
    pub async fn get_auto_reminder_profiles(
        &self,
    ) -> Result<Vec<entity::profile::Model>, DbErr> {
        let profiles = entity::prelude::Profile::find().all(self.db).await?;

        Ok(profiles
            .into_iter()
            .filter(|profile| {
                !preferences::parse_string_array(&profile.auto_reminder_platforms).is_empty()
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseConnection, DbErr};

    use crate::util::test::setup::{create_tables, test_setup};

    async fn setup() -> Result<DatabaseConnection, DbErr> {
        let test = test_setup().await;
        let db = test.state.db;

        create_tables(&db).await?;

        Ok(db)
    }

    mod create_tests {
        use sea_orm::DbErr;

        use crate::data::profile::{tests::setup, ProfileRepository};

        /// New profiles carry the dashboard defaults
        #[tokio::test]
        async fn creates_profile_with_defaults() -> Result<(), DbErr> {
            let db = setup().await?;
            let profile_repo = ProfileRepository::new(&db);

            let profile = profile_repo
                .create("auth0|alice", Some("Alice".to_string()))
                .await?;

            assert_eq!(profile.user_id, "auth0|alice");
            assert_eq!(profile.reminder_offsets, serde_json::json!([30, 60]));
            assert_eq!(
                profile.notification_channels,
                serde_json::json!({"email": true, "browser": true, "whatsapp": false})
            );
            assert_eq!(profile.auto_reminder_platforms, serde_json::json!([]));

            Ok(())
        }

        /// The external subject is unique
        #[tokio::test]
        async fn rejects_duplicate_user_id() -> Result<(), DbErr> {
            let db = setup().await?;
            let profile_repo = ProfileRepository::new(&db);

            profile_repo.create("auth0|alice", None).await?;
            let result = profile_repo.create("auth0|alice", None).await;

            assert!(result.is_err());

            Ok(())
        }
    }

    mod update_preferences_tests {
        use sea_orm::DbErr;
        use serde_json::json;

        use crate::{
            data::profile::{tests::setup, ProfileRepository},
            model::api::UpdatePreferencesDto,
        };

        fn offsets_update(offsets: serde_json::Value) -> UpdatePreferencesDto {
            UpdatePreferencesDto {
                full_name: None,
                phone_number: None,
                reminder_offsets: Some(offsets),
                notification_channels: None,
                preferred_platforms: None,
                auto_reminder_platforms: None,
            }
        }

        /// Absent fields keep their previous values
        #[tokio::test]
        async fn applies_partial_update() -> Result<(), DbErr> {
            let db = setup().await?;
            let profile_repo = ProfileRepository::new(&db);

            let profile = profile_repo.create("auth0|alice", None).await?;
            let updated = profile_repo
                .update_preferences(profile.id, offsets_update(json!([15, 45])))
                .await?
                .unwrap();

            assert_eq!(updated.reminder_offsets, json!([15, 45]));
            // Untouched columns keep their defaults
            assert_eq!(
                updated.notification_channels,
                json!({"email": true, "browser": true, "whatsapp": false})
            );

            Ok(())
        }

        /// Updating a missing profile reports None instead of erroring
        #[tokio::test]
        async fn returns_none_for_unknown_profile() -> Result<(), DbErr> {
            let db = setup().await?;
            let profile_repo = ProfileRepository::new(&db);

            let result = profile_repo
                .update_preferences(999, offsets_update(json!([10])))
                .await?;

            assert!(result.is_none());

            Ok(())
        }
    }

    mod get_auto_reminder_profiles_tests {
        use sea_orm::DbErr;
        use serde_json::json;

        use crate::{
            data::profile::{tests::setup, ProfileRepository},
            model::api::UpdatePreferencesDto,
        };

        /// Only profiles with a non-empty platform set fan out
        #[tokio::test]
        async fn filters_opted_in_profiles() -> Result<(), DbErr> {
            let db = setup().await?;
            let profile_repo = ProfileRepository::new(&db);

            let alice = profile_repo.create("auth0|alice", None).await?;
            profile_repo.create("auth0|bob", None).await?;

            profile_repo
                .update_preferences(
                    alice.id,
                    UpdatePreferencesDto {
                        full_name: None,
                        phone_number: None,
                        reminder_offsets: None,
                        notification_channels: None,
                        preferred_platforms: None,
                        auto_reminder_platforms: Some(json!(["codeforces"])),
                    },
                )
                .await?;

            let opted_in = profile_repo.get_auto_reminder_profiles().await?;

            assert_eq!(opted_in.len(), 1);
            assert_eq!(opted_in[0].user_id, "auth0|alice");

            Ok(())
        }
    }
}
