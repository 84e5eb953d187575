use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "contests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub url: String,
    pub start_time: DateTime,
    pub duration: i64,
    pub platform: String,
    pub external_id: String,
    pub is_featured: bool,
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
