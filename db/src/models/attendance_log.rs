use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr, QueryFilter, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One gate scan. Rows are appended and never updated.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "attendance_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub log_type: LogType,
    /// Tag as scanned, kept even if the student's tag is later reassigned.
    pub rfid_tag: String,
    pub timestamp: DateTime<Utc>,
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
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "log_type")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogType {
    #[sea_orm(string_value = "entry")]
    Entry,

    #[sea_orm(string_value = "exit")]
    Exit,
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

/// Filter for [`Model::list`]. Time bounds are half-open: `since <= timestamp < until`.
#[derive(Debug, Clone, Default)]
pub struct LogQuery {
    pub student_id: Option<i64>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub limit: u64,
}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        student_id: i64,
        log_type: LogType,
        rfid_tag: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        let active = ActiveModel {
            student_id: Set(student_id),
            log_type: Set(log_type),
            rfid_tag: Set(rfid_tag.to_owned()),
            timestamp: Set(timestamp),
            ..Default::default()
        };
        active.insert(db).await
    }

    /// Most recent scan for a student. Equal timestamps resolve to the later insert.
    pub async fn latest_for_student<C: ConnectionTrait>(
        db: &C,
        student_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::Timestamp)
            .order_by_desc(Column::Id)
            .one(db)
            .await
    }

    /// Newest first, with the owning student joined in.
    pub async fn list<C: ConnectionTrait>(
        db: &C,
        query: &LogQuery,
    ) -> Result<Vec<(Model, Option<super::student::Model>)>, DbErr> {
        let mut select = Entity::find();
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(since) = query.since {
            select = select.filter(Column::Timestamp.gte(since));
        }
        if let Some(until) = query.until {
            select = select.filter(Column::Timestamp.lt(until));
        }

        select
            .find_also_related(super::student::Entity)
            .order_by_desc(Column::Timestamp)
            .order_by_desc(Column::Id)
            .limit(query.limit)
            .all(db)
            .await
    }
}
