use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, DbErr, QueryFilter, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Same-day "staying in the hostel instead of attending college" declaration.
///
/// At most one row exists per `(student_id, date)`; see `uq_college_leave_student_date`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "college_leave_status")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub date: NaiveDate,
    pub reason: String,
    pub status: CollegeLeaveStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "college_leave_status")]
#[strum(serialize_all = "snake_case")]
pub enum CollegeLeaveStatus {
    #[sea_orm(string_value = "inside_hostel")]
    InsideHostel,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Inserts or overwrites the record for `(student_id, date)` in one statement.
    ///
    /// A concurrent insert for the same key is absorbed by `ON CONFLICT DO UPDATE`.
    pub async fn upsert<C: ConnectionTrait>(
        db: &C,
        student_id: i64,
        date: NaiveDate,
        reason: &str,
        status: CollegeLeaveStatus,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let active = ActiveModel {
            student_id: Set(student_id),
            date: Set(date),
            reason: Set(reason.to_owned()),
            status: Set(status),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Entity::insert(active)
            .on_conflict(
                OnConflict::columns([Column::StudentId, Column::Date])
                    .update_columns([Column::Reason, Column::Status, Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;

        Self::find_for(db, student_id, date)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("College leave record vanished after upsert".into()))
    }

    pub async fn find_for<C: ConnectionTrait>(
        db: &C,
        student_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Date.eq(date))
            .one(db)
            .await
    }

    /// Every record dated `date`, keyed for roster lookups.
    pub async fn find_on<C: ConnectionTrait>(db: &C, date: NaiveDate) -> Result<Vec<Model>, DbErr> {
        Entity::find().filter(Column::Date.eq(date)).all(db).await
    }

    pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn delete_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<u64, DbErr> {
        Ok(Entity::delete_by_id(id).exec(db).await?.rows_affected)
    }

    /// Records on `date` (optionally for one student), ordered by student number.
    pub async fn list_on<C: ConnectionTrait>(
        db: &C,
        date: NaiveDate,
        student_id: Option<i64>,
    ) -> Result<Vec<(Model, Option<super::student::Model>)>, DbErr> {
        let mut select = Entity::find().filter(Column::Date.eq(date));
        if let Some(student_id) = student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        select
            .find_also_related(super::student::Entity)
            .order_by_desc(Column::Date)
            .order_by_asc(super::student::Column::StudentNumber)
            .all(db)
            .await
    }

    pub async fn list_recent_for_student<C: ConnectionTrait>(
        db: &C,
        student_id: i64,
        limit: u64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::Date)
            .limit(limit)
            .all(db)
            .await
    }
}
