use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{ConnectionTrait, DbErr, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "holiday_leave_applications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub reason: String,
    pub status: LeaveStatus,
    /// Reviewer's user id, set on approval or rejection.
    pub approved_by: Option<i64>,
    pub applied_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub remarks: Option<String>,
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
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "leave_status")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LeaveStatus {
    #[sea_orm(string_value = "pending")]
    Pending,

    #[sea_orm(string_value = "approved")]
    Approved,

    #[sea_orm(string_value = "rejected")]
    Rejected,
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

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ApprovedBy",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    Reviewer,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviewer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        student_id: i64,
        from_date: NaiveDate,
        to_date: NaiveDate,
        reason: &str,
        applied_at: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        let active = ActiveModel {
            student_id: Set(student_id),
            from_date: Set(from_date),
            to_date: Set(to_date),
            reason: Set(reason.to_owned()),
            status: Set(LeaveStatus::Pending),
            applied_at: Set(applied_at),
            ..Default::default()
        };
        active.insert(db).await
    }

    pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// Moves a pending application to `decision`.
    ///
    /// The `status = pending` guard lives in the UPDATE itself, so a second reviewer
    /// racing the first matches zero rows. Returns the number of rows changed.
    pub async fn record_decision<C: ConnectionTrait>(
        db: &C,
        id: i64,
        decision: LeaveStatus,
        reviewer_id: i64,
        remarks: Option<String>,
        reviewed_at: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        let result = Entity::update_many()
            .col_expr(Column::Status, Expr::value(decision))
            .col_expr(Column::ApprovedBy, Expr::value(reviewer_id))
            .col_expr(Column::ReviewedAt, Expr::value(reviewed_at))
            .col_expr(Column::Remarks, Expr::value(remarks))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(LeaveStatus::Pending))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Deletes the application only if it belongs to `student_id` and is still pending.
    pub async fn delete_pending<C: ConnectionTrait>(
        db: &C,
        id: i64,
        student_id: i64,
    ) -> Result<u64, DbErr> {
        let result = Entity::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Status.eq(LeaveStatus::Pending))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Newest application first.
    pub async fn list<C: ConnectionTrait>(
        db: &C,
        status: Option<LeaveStatus>,
        student_id: Option<i64>,
    ) -> Result<Vec<(Model, Option<super::student::Model>)>, DbErr> {
        let mut select = Entity::find();
        if let Some(status) = status {
            select = select.filter(Column::Status.eq(status));
        }
        if let Some(student_id) = student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        select
            .find_also_related(super::student::Entity)
            .order_by_desc(Column::AppliedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    /// Approved applications whose window contains `date`.
    pub async fn approved_covering<C: ConnectionTrait>(
        db: &C,
        date: NaiveDate,
        student_id: Option<i64>,
    ) -> Result<Vec<Model>, DbErr> {
        let mut select = Entity::find()
            .filter(Column::Status.eq(LeaveStatus::Approved))
            .filter(Column::FromDate.lte(date))
            .filter(Column::ToDate.gte(date));
        if let Some(student_id) = student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        select.all(db).await
    }
}
