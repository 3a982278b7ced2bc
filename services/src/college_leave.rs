//! College-leave register: one same-day "staying inside the hostel" record per student and date.

use crate::error::{ServiceError, ServiceResult};
use crate::input;
use chrono::{DateTime, NaiveDate, Utc};
use db::models::college_leave::{self, CollegeLeaveStatus};
use db::models::student;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{info, warn};
use util::dates::{Clock, is_working_day};

/// Records returned to a student listing their own history.
pub const SELF_HISTORY_LIMIT: u64 = 30;

#[derive(Debug, Clone, Serialize)]
pub struct CollegeLeaveEntry {
    pub id: i64,
    pub student_id: i64,
    pub student_number: Option<String>,
    pub student_name: Option<String>,
    pub room_number: Option<String>,
    pub date: NaiveDate,
    pub reason: String,
    pub status: CollegeLeaveStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CollegeLeaveEntry {
    fn new(record: college_leave::Model, student: Option<student::Model>) -> Self {
        Self {
            id: record.id,
            student_id: record.student_id,
            student_number: student.as_ref().map(|s| s.student_number.clone()),
            student_name: student.as_ref().map(|s| s.full_name()),
            room_number: student.and_then(|s| s.room_number),
            date: record.date,
            reason: record.reason,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Declares that the student stays inside the hostel today instead of attending college.
///
/// Only today's date (in the hostel timezone) on a working day is accepted. Declaring
/// twice overwrites the reason of the existing record.
pub async fn declare_inside_hostel(
    db: &DatabaseConnection,
    clock: &dyn Clock,
    student_id: i64,
    date: &str,
    reason: &str,
) -> ServiceResult<college_leave::Model> {
    input::require_fields(&[("date", date), ("reason", reason)])?;
    let date = input::parse_date("date", date)?;

    let today = clock.today();
    if date != today {
        return Err(ServiceError::DateNotToday { today });
    }
    if !is_working_day(date) {
        return Err(ServiceError::NotWorkingDay);
    }
    let reason = input::reason(reason)?;

    let record = college_leave::Model::upsert(
        db,
        student_id,
        date,
        reason,
        CollegeLeaveStatus::InsideHostel,
    )
    .await?;

    info!(student_id, record_id = record.id, %date, "College leave declared");
    Ok(record)
}

/// Deletes one of the student's own records, provided it is dated today.
pub async fn revoke(
    db: &DatabaseConnection,
    clock: &dyn Clock,
    student_id: i64,
    record_id: i64,
) -> ServiceResult<()> {
    let record = college_leave::Model::get_by_id(db, record_id)
        .await?
        .filter(|r| r.student_id == student_id)
        .ok_or(ServiceError::NotFound("College leave record"))?;

    if record.date != clock.today() {
        warn!(student_id, record_id, date = %record.date, "Refused to revoke past or future college leave");
        return Err(ServiceError::NotRevocable);
    }

    college_leave::Model::delete_by_id(db, record_id).await?;
    info!(student_id, record_id, "College leave revoked");
    Ok(())
}

pub async fn record_for(
    db: &DatabaseConnection,
    student_id: i64,
    date: NaiveDate,
) -> ServiceResult<Option<college_leave::Model>> {
    Ok(college_leave::Model::find_for(db, student_id, date).await?)
}

/// Staff listing for one date, today when `date` is omitted.
pub async fn list(
    db: &DatabaseConnection,
    clock: &dyn Clock,
    date: Option<NaiveDate>,
    student_id: Option<i64>,
) -> ServiceResult<Vec<CollegeLeaveEntry>> {
    let date = date.unwrap_or_else(|| clock.today());
    let rows = college_leave::Model::list_on(db, date, student_id).await?;
    Ok(rows
        .into_iter()
        .map(|(record, student)| CollegeLeaveEntry::new(record, student))
        .collect())
}

pub async fn list_for_student(
    db: &DatabaseConnection,
    student_id: i64,
) -> ServiceResult<Vec<college_leave::Model>> {
    Ok(college_leave::Model::list_recent_for_student(db, student_id, SELF_HISTORY_LIMIT).await?)
}
