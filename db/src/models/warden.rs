use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr, QueryFilter, QueryOrder, Set};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "wardens")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
        first_name: &str,
        last_name: &str,
        phone_number: Option<&str>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let active = ActiveModel {
            user_id: Set(user_id),
            first_name: Set(first_name.trim().to_owned()),
            last_name: Set(last_name.trim().to_owned()),
            phone_number: Set(phone_number
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_owned)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        active.insert(db).await
    }

    pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn find_by_user_id<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .one(db)
            .await
    }

    pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_asc(Column::LastName)
            .order_by_asc(Column::FirstName)
            .all(db)
            .await
    }

    pub async fn update_details<C: ConnectionTrait>(
        db: &C,
        existing: Model,
        first_name: Option<String>,
        last_name: Option<String>,
        phone_number: Option<String>,
    ) -> Result<Model, DbErr> {
        let mut active: ActiveModel = existing.into();
        if let Some(v) = first_name {
            active.first_name = Set(v.trim().to_owned());
        }
        if let Some(v) = last_name {
            active.last_name = Set(v.trim().to_owned());
        }
        if let Some(v) = phone_number {
            let v = v.trim().to_owned();
            active.phone_number = Set((!v.is_empty()).then_some(v));
        }
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }
}
