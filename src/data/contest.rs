use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    sea_query::{Expr, OnConflict},
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::model::provider::ProviderContest;

pub struct ContestRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ContestRepository<'a> {
    /// Creates a new instance of [`ContestRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Upserts normalized provider contests keyed on `(platform, external_id)`.
    ///
    /// Existing rows update their mutable fields (name, url, start_time, duration);
    /// unmatched keys insert new rows. Running the same batch twice produces zero
    /// net row changes. The admin-controlled `is_featured` flag is never touched
    /// on conflict.
    pub async fn upsert_many(
        &self,
        contests: Vec<ProviderContest>,
    ) -> Result<Vec<entity::contest::Model>, DbErr> {
        if contests.is_empty() {
            return Ok(Vec::new());
        }

        let now = Utc::now().naive_utc();
        let models = contests
            .into_iter()
            .map(|contest| entity::contest::ActiveModel {
                name: ActiveValue::Set(contest.name),
                url: ActiveValue::Set(contest.url),
                start_time: ActiveValue::Set(contest.start_time.naive_utc()),
                duration: ActiveValue::Set(contest.duration),
                platform: ActiveValue::Set(contest.platform.to_string()),
                external_id: ActiveValue::Set(contest.external_id),
                is_featured: ActiveValue::Set(false),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            });

        entity::prelude::Contest::insert_many(models)
            .on_conflict(
                OnConflict::columns([
                    entity::contest::Column::Platform,
                    entity::contest::Column::ExternalId,
                ])
                .update_columns([
                    entity::contest::Column::Name,
                    entity::contest::Column::Url,
                    entity::contest::Column::StartTime,
                    entity::contest::Column::Duration,
                    entity::contest::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_with_returning(self.db)
            .await
    }

    /// Get a contest using its store-assigned ID
    pub async fn get_by_id(&self, id: i32) -> Result<Option<entity::contest::Model>, DbErr> {
        entity::prelude::Contest::find_by_id(id).one(self.db).await
    }

    /// Upcoming contests ordered by start time, optionally filtered by platform
    pub async fn get_upcoming(
        &self,
        after: NaiveDateTime,
        platform: Option<&str>,
        limit: u64,
    ) -> Result<Vec<entity::contest::Model>, DbErr> {
        let mut query = entity::prelude::Contest::find()
            .filter(entity::contest::Column::StartTime.gte(after))
            .order_by_asc(entity::contest::Column::StartTime)
            .limit(limit);

        if let Some(platform) = platform {
            query = query.filter(entity::contest::Column::Platform.eq(platform));
        }

        query.all(self.db).await
    }

    /// Sets the admin-controlled featured flag, returning affected row count
    pub async fn set_featured(&self, id: i32, is_featured: bool) -> Result<u64, DbErr> {
        let result = entity::prelude::Contest::update_many()
            .col_expr(
                entity::contest::Column::IsFeatured,
                Expr::value(is_featured),
            )
            .col_expr(
                entity::contest::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::contest::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Retention sweep: deletes contests that started before `cutoff`
    pub async fn delete_started_before(
        &self,
        cutoff: NaiveDateTime,
    ) -> Result<DeleteResult, DbErr> {
        entity::prelude::Contest::delete_many()
            .filter(entity::contest::Column::StartTime.lt(cutoff))
            .exec(self.db)
            .await
    }
}
