//! Attendance ledger: the append-only stream of gate scans per student.

use crate::error::{ServiceError, ServiceResult};
use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use db::models::attendance_log::{self, LogQuery, LogType};
use db::models::student;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::str::FromStr;
use tracing::{info, warn};
use util::dates::{Clock, compare_date_range, localize};

pub const DEFAULT_LIMIT: u64 = 100;
pub const MAX_LIMIT: u64 = 1000;

/// A scan joined with the student it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub id: i64,
    pub student_id: i64,
    pub student_number: Option<String>,
    pub student_name: Option<String>,
    pub room_number: Option<String>,
    pub log_type: LogType,
    pub rfid_tag: String,
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    fn from_pair((log, student): (attendance_log::Model, Option<student::Model>)) -> Self {
        Self {
            id: log.id,
            student_id: log.student_id,
            student_number: student.as_ref().map(|s| s.student_number.clone()),
            student_name: student.as_ref().map(|s| s.full_name()),
            room_number: student.and_then(|s| s.room_number),
            log_type: log.log_type,
            rfid_tag: log.rfid_tag,
            timestamp: log.timestamp,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    pub student_id: Option<i64>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub limit: Option<u64>,
}

pub fn parse_direction(raw: &str) -> ServiceResult<LogType> {
    LogType::from_str(raw.trim()).map_err(|_| ServiceError::InvalidDirection)
}

pub fn clamp_limit(limit: Option<u64>) -> u64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Appends one scan for the student holding `rfid_tag`.
pub async fn record_event(
    db: &DatabaseConnection,
    clock: &dyn Clock,
    rfid_tag: &str,
    log_type: &str,
) -> ServiceResult<attendance_log::Model> {
    let rfid_tag = rfid_tag.trim();
    let log_type = log_type.trim();

    let missing: Vec<&str> = [("rfid_tag", rfid_tag), ("log_type", log_type)]
        .into_iter()
        .filter(|(_, v)| v.is_empty())
        .map(|(k, _)| k)
        .collect();
    if !missing.is_empty() {
        return Err(ServiceError::MissingFields(missing.join(", ")));
    }

    let direction = parse_direction(log_type)?;

    let Some(owner) = student::Model::find_by_rfid_tag(db, rfid_tag).await? else {
        warn!(rfid_tag, "Scan rejected: unknown RFID tag");
        return Err(ServiceError::UnknownRfidTag);
    };

    let event =
        attendance_log::Model::create(db, owner.id, direction, rfid_tag, clock.now()).await?;

    info!(
        student_id = owner.id,
        log_type = %direction,
        event_id = event.id,
        "Attendance event recorded"
    );

    Ok(event)
}

/// The student's most recent scan, if any.
pub async fn latest_event(
    db: &DatabaseConnection,
    student_id: i64,
) -> ServiceResult<Option<attendance_log::Model>> {
    Ok(attendance_log::Model::latest_for_student(db, student_id).await?)
}

/// UTC bounds covering the inclusive local-date window `[from, to]` in `tz`.
pub fn day_bounds(
    tz: &Tz,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
    let start_of = |d: NaiveDate| localize(tz, d.and_time(NaiveTime::MIN)).with_timezone(&Utc);
    let since = from.map(start_of);
    let until = to.map(|d| start_of(d.checked_add_days(Days::new(1)).unwrap_or(d)));
    (since, until)
}

/// Scans newest first, limited and optionally bounded by local calendar dates.
pub async fn list_events(
    db: &DatabaseConnection,
    clock: &dyn Clock,
    filter: LogFilter,
) -> ServiceResult<Vec<LogEntry>> {
    if let (Some(from), Some(to)) = (filter.from_date, filter.to_date) {
        compare_date_range(from, to)?;
    }

    let (since, until) = day_bounds(&clock.timezone(), filter.from_date, filter.to_date);
    let query = LogQuery {
        student_id: filter.student_id,
        since,
        until,
        limit: clamp_limit(filter.limit),
    };

    let rows = attendance_log::Model::list(db, &query).await?;
    Ok(rows.into_iter().map(LogEntry::from_pair).collect())
}
