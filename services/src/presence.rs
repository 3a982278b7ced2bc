//! Presence resolver. Nothing here is persisted; verdicts are recomputed on every read.
//!
//! Precedence: today's college-leave declaration, then the latest gate scan.

use crate::error::{ServiceError, ServiceResult};
use chrono::{DateTime, NaiveDate, Utc};
use db::models::attendance_log::{self, LogType};
use db::models::college_leave::{self, CollegeLeaveStatus};
use db::models::student;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use util::dates::Clock;

pub const DISPLAY_COLLEGE_LEAVE: &str = "Inside Hostel (College Leave)";
pub const DISPLAY_PRESENT: &str = "Present";
pub const DISPLAY_OUTSIDE: &str = "Outside";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceSource {
    CollegeLeave,
    AttendanceLog,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub present: bool,
    pub display: &'static str,
    pub source: PresenceSource,
}

/// Combines the day's college-leave record and the latest scan into one verdict.
pub fn verdict(
    college_leave: Option<&college_leave::Model>,
    last_event: Option<&attendance_log::Model>,
) -> Verdict {
    if college_leave.is_some_and(|r| r.status == CollegeLeaveStatus::InsideHostel) {
        return Verdict {
            present: true,
            display: DISPLAY_COLLEGE_LEAVE,
            source: PresenceSource::CollegeLeave,
        };
    }

    match last_event {
        Some(e) if e.log_type == LogType::Entry => Verdict {
            present: true,
            display: DISPLAY_PRESENT,
            source: PresenceSource::AttendanceLog,
        },
        Some(_) => Verdict {
            present: false,
            display: DISPLAY_OUTSIDE,
            source: PresenceSource::AttendanceLog,
        },
        None => Verdict {
            present: false,
            display: DISPLAY_OUTSIDE,
            source: PresenceSource::None,
        },
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PresenceStatus {
    pub student_id: i64,
    pub student_number: String,
    pub student_name: String,
    pub room_number: Option<String>,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub verdict: Verdict,
    pub last_direction: Option<LogType>,
    pub last_updated: Option<DateTime<Utc>>,
    pub college_leave_reason: Option<String>,
    /// An approved holiday leave covers `date`. Does not affect `present`.
    pub on_holiday_leave: bool,
}

fn status_of(
    student: student::Model,
    date: NaiveDate,
    college_leave: Option<&college_leave::Model>,
    last_event: Option<&attendance_log::Model>,
    on_holiday_leave: bool,
) -> PresenceStatus {
    PresenceStatus {
        student_id: student.id,
        student_name: student.full_name(),
        student_number: student.student_number,
        room_number: student.room_number,
        date,
        verdict: verdict(college_leave, last_event),
        last_direction: last_event.map(|e| e.log_type),
        last_updated: last_event.map(|e| e.timestamp),
        college_leave_reason: college_leave.map(|r| r.reason.clone()),
        on_holiday_leave,
    }
}

/// Presence of one student on `date` (today when omitted).
pub async fn resolve(
    db: &DatabaseConnection,
    clock: &dyn Clock,
    student_id: i64,
    date: Option<NaiveDate>,
) -> ServiceResult<PresenceStatus> {
    let date = date.unwrap_or_else(|| clock.today());
    let student = student::Model::get_by_id(db, student_id)
        .await?
        .ok_or(ServiceError::NotFound("Student"))?;

    let leave = college_leave::Model::find_for(db, student_id, date).await?;
    let last = attendance_log::Model::latest_for_student(db, student_id).await?;
    let on_holiday = !crate::holiday_leave::approved_on(db, date, Some(student_id))
        .await?
        .is_empty();

    Ok(status_of(student, date, leave.as_ref(), last.as_ref(), on_holiday))
}

/// Presence of every student today, ordered by student number.
pub async fn roster(db: &DatabaseConnection, clock: &dyn Clock) -> ServiceResult<Vec<PresenceStatus>> {
    let date = clock.today();
    let students = student::Model::list_all(db).await?;

    let leaves: HashMap<i64, college_leave::Model> = college_leave::Model::find_on(db, date)
        .await?
        .into_iter()
        .map(|r| (r.student_id, r))
        .collect();
    let on_holiday: HashSet<i64> = crate::holiday_leave::approved_on(db, date, None)
        .await?
        .into_iter()
        .map(|a| a.student_id)
        .collect();

    let mut statuses = Vec::with_capacity(students.len());
    for student in students {
        let last = attendance_log::Model::latest_for_student(db, student.id).await?;
        let holiday = on_holiday.contains(&student.id);
        let leave = leaves.get(&student.id);
        statuses.push(status_of(student, date, leave, last.as_ref(), holiday));
    }
    Ok(statuses)
}
