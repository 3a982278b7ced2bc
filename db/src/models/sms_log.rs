use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr, QueryFilter, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One reminder delivery attempt, successful or not.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "sms_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub phone_number: String,
    pub message: String,
    pub status: DeliveryStatus,
    /// True when no provider credentials were configured and the send was only logged.
    pub simulated: bool,
    pub provider_reference: Option<String>,
    pub error: Option<String>,
    pub sent_at: DateTime<Utc>,
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
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "delivery_status")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DeliveryStatus {
    #[sea_orm(string_value = "sent")]
    Sent,

    #[sea_orm(string_value = "failed")]
    Failed,
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

/// Outcome columns of a delivery attempt.
#[derive(Debug, Clone)]
pub struct Attempt {
    pub status: DeliveryStatus,
    pub simulated: bool,
    pub provider_reference: Option<String>,
    pub error: Option<String>,
}

impl Model {
    pub async fn record<C: ConnectionTrait>(
        db: &C,
        student_id: i64,
        phone_number: &str,
        message: &str,
        attempt: Attempt,
        sent_at: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        let active = ActiveModel {
            student_id: Set(student_id),
            phone_number: Set(phone_number.to_owned()),
            message: Set(message.to_owned()),
            status: Set(attempt.status),
            simulated: Set(attempt.simulated),
            provider_reference: Set(attempt.provider_reference),
            error: Set(attempt.error),
            sent_at: Set(sent_at),
            ..Default::default()
        };
        active.insert(db).await
    }

    /// Newest first, with the student joined in.
    pub async fn list<C: ConnectionTrait>(
        db: &C,
        student_id: Option<i64>,
        limit: u64,
    ) -> Result<Vec<(Model, Option<super::student::Model>)>, DbErr> {
        let mut select = Entity::find();
        if let Some(student_id) = student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        select
            .find_also_related(super::student::Entity)
            .order_by_desc(Column::SentAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(db)
            .await
    }
}
