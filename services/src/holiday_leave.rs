//! Holiday-leave workflow.
//!
//! ```text
//! pending --approve--> approved
//! pending --reject---> rejected
//! pending --cancel---> (deleted)
//! ```
//!
//! Approved and rejected applications are final. Overlapping applications from the
//! same student are accepted as-is.

use crate::error::{ServiceError, ServiceResult};
use crate::input;
use chrono::{DateTime, NaiveDate, Utc};
use db::models::holiday_leave::{self, LeaveStatus};
use db::models::{student, user};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::Serialize;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::{info, warn};
use util::dates::{Clock, compare_date_range};

#[derive(Debug, Clone, Serialize)]
pub struct HolidayLeaveEntry {
    pub id: i64,
    pub student_id: i64,
    pub student_number: Option<String>,
    pub student_name: Option<String>,
    pub room_number: Option<String>,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub reason: String,
    pub status: LeaveStatus,
    pub approved_by: Option<i64>,
    pub approved_by_username: Option<String>,
    pub applied_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter {
    pub status: Option<LeaveStatus>,
    pub student_id: Option<i64>,
}

/// Parses a listing filter value; any of the three states is accepted.
pub fn parse_status(raw: &str) -> ServiceResult<LeaveStatus> {
    LeaveStatus::from_str(raw.trim()).map_err(|_| ServiceError::InvalidStatus)
}

/// Parses a review decision; only `approved` and `rejected` are decisions.
pub fn parse_decision(raw: &str) -> ServiceResult<LeaveStatus> {
    match parse_status(raw)? {
        LeaveStatus::Pending => Err(ServiceError::InvalidStatus),
        decision => Ok(decision),
    }
}

/// Files a new application in `pending`.
pub async fn apply(
    db: &DatabaseConnection,
    clock: &dyn Clock,
    student_id: i64,
    from_date: &str,
    to_date: &str,
    reason: &str,
) -> ServiceResult<holiday_leave::Model> {
    input::require_fields(&[
        ("from_date", from_date),
        ("to_date", to_date),
        ("reason", reason),
    ])?;
    let from = input::parse_date("from_date", from_date)?;
    let to = input::parse_date("to_date", to_date)?;
    compare_date_range(from, to)?;
    let reason = input::reason(reason)?;

    let application =
        holiday_leave::Model::create(db, student_id, from, to, reason, clock.now()).await?;

    info!(
        student_id,
        application_id = application.id,
        %from,
        %to,
        "Holiday leave application submitted"
    );
    Ok(application)
}

/// Approves or rejects a pending application. A second review fails with `AlreadyReviewed`.
pub async fn review(
    db: &DatabaseConnection,
    clock: &dyn Clock,
    application_id: i64,
    reviewer_id: i64,
    decision: &str,
    remarks: Option<&str>,
) -> ServiceResult<holiday_leave::Model> {
    let decision = parse_decision(decision)?;

    let changed = holiday_leave::Model::record_decision(
        db,
        application_id,
        decision,
        reviewer_id,
        input::optional_text(remarks),
        clock.now(),
    )
    .await?;

    let current = holiday_leave::Model::get_by_id(db, application_id)
        .await?
        .ok_or(ServiceError::NotFound("Leave application"))?;

    if changed == 0 {
        warn!(
            application_id,
            reviewer_id,
            status = %current.status,
            "Review refused: application already decided"
        );
        return Err(ServiceError::AlreadyReviewed);
    }

    info!(application_id, reviewer_id, status = %decision, "Holiday leave reviewed");
    Ok(current)
}

/// Withdraws the student's own pending application.
pub async fn cancel(
    db: &DatabaseConnection,
    student_id: i64,
    application_id: i64,
) -> ServiceResult<()> {
    let removed = holiday_leave::Model::delete_pending(db, application_id, student_id).await?;
    if removed > 0 {
        info!(student_id, application_id, "Holiday leave application cancelled");
        return Ok(());
    }

    match holiday_leave::Model::get_by_id(db, application_id).await? {
        Some(app) if app.student_id == student_id => Err(ServiceError::NotCancellable),
        _ => Err(ServiceError::NotFound("Leave application")),
    }
}

/// Applications newest first, each with its student and reviewer username.
pub async fn list(
    db: &DatabaseConnection,
    filter: ApplicationFilter,
) -> ServiceResult<Vec<HolidayLeaveEntry>> {
    let rows = holiday_leave::Model::list(db, filter.status, filter.student_id).await?;

    let reviewer_ids: Vec<i64> = rows.iter().filter_map(|(a, _)| a.approved_by).collect();
    let reviewers: HashMap<i64, String> = if reviewer_ids.is_empty() {
        HashMap::new()
    } else {
        user::Entity::find()
            .filter(user::Column::Id.is_in(reviewer_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect()
    };

    Ok(rows
        .into_iter()
        .map(|(app, student)| entry(app, student, &reviewers))
        .collect())
}

pub async fn list_for_student(
    db: &DatabaseConnection,
    student_id: i64,
) -> ServiceResult<Vec<HolidayLeaveEntry>> {
    list(
        db,
        ApplicationFilter {
            student_id: Some(student_id),
            ..Default::default()
        },
    )
    .await
}

/// Approved applications covering `date`, optionally for one student.
pub async fn approved_on(
    db: &DatabaseConnection,
    date: NaiveDate,
    student_id: Option<i64>,
) -> ServiceResult<Vec<holiday_leave::Model>> {
    Ok(holiday_leave::Model::approved_covering(db, date, student_id).await?)
}

fn entry(
    app: holiday_leave::Model,
    student: Option<student::Model>,
    reviewers: &HashMap<i64, String>,
) -> HolidayLeaveEntry {
    HolidayLeaveEntry {
        id: app.id,
        student_id: app.student_id,
        student_number: student.as_ref().map(|s| s.student_number.clone()),
        student_name: student.as_ref().map(|s| s.full_name()),
        room_number: student.and_then(|s| s.room_number),
        from_date: app.from_date,
        to_date: app.to_date,
        reason: app.reason,
        status: app.status,
        approved_by_username: app.approved_by.and_then(|id| reviewers.get(&id).cloned()),
        approved_by: app.approved_by,
        applied_at: app.applied_at,
        reviewed_at: app.reviewed_at,
        remarks: app.remarks,
    }
}
