use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: String,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub reminder_offsets: Json,
    pub notification_channels: Json,
    pub preferred_platforms: Json,
    pub auto_reminder_platforms: Json,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::contest_subscription::Entity")]
    ContestSubscription,
    #[sea_orm(has_many = "super::reminder::Entity")]
    Reminder,
}

impl Related<super::contest_subscription::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContestSubscription.def()
    }
}

impl Related<super::reminder::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reminder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
