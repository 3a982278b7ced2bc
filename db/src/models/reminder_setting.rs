use chrono::{DateTime, NaiveTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, DbErr, Set};
use serde::Serialize;

/// The only row id `reminder_settings` ever holds.
pub const SINGLETON_ID: i64 = 1;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "reminder_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub reminder_time: NaiveTime,
    pub is_active: bool,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    Creator,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn current<C: ConnectionTrait>(db: &C) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(SINGLETON_ID).one(db).await
    }

    /// Writes the singleton row, creating it on first use.
    pub async fn upsert<C: ConnectionTrait>(
        db: &C,
        reminder_time: NaiveTime,
        is_active: bool,
        created_by: Option<i64>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let active = ActiveModel {
            id: Set(SINGLETON_ID),
            reminder_time: Set(reminder_time),
            is_active: Set(is_active),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Entity::insert(active)
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([
                        Column::ReminderTime,
                        Column::IsActive,
                        Column::CreatedBy,
                        Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;

        Self::current(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Reminder settings missing after upsert".into()))
    }
}
