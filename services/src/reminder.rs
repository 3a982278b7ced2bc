//! Reminder settings and the dispatch of attendance reminder SMS.

use crate::error::{ServiceError, ServiceResult};
use crate::sms::{DeliveryOutcome, SmsTransport};
use chrono::{DateTime, NaiveTime, Utc};
use db::models::reminder_setting;
use db::models::sms_log::{self, Attempt, DeliveryStatus};
use db::models::student;
use futures::stream::{self, StreamExt};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{error, info};
use util::config;
use util::dates::Clock;

pub const TIME_FORMAT: &str = "%H:%M:%S";
pub const DEFAULT_LOG_LIMIT: u64 = 50;

#[derive(Debug, Clone, Serialize)]
pub struct ReminderSettingsView {
    pub reminder_time: String,
    pub is_active: bool,
    pub created_by: Option<i64>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<reminder_setting::Model> for ReminderSettingsView {
    fn from(m: reminder_setting::Model) -> Self {
        Self {
            reminder_time: m.reminder_time.format(TIME_FORMAT).to_string(),
            is_active: m.is_active,
            created_by: m.created_by,
            updated_at: Some(m.updated_at),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub attempted: usize,
    pub sent: usize,
    pub failed: usize,
    /// Subset of `sent` that went through the simulator.
    pub simulated: usize,
    /// Attempts whose `sms_logs` row could not be written.
    pub log_failures: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SmsLogEntry {
    #[serde(flatten)]
    pub log: sms_log::Model,
    pub student_number: Option<String>,
    pub student_name: Option<String>,
}

/// Accepts `HH:MM:SS` or `HH:MM`.
pub fn parse_reminder_time(raw: &str) -> ServiceResult<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|_| ServiceError::InvalidReminderTime)
}

pub fn reminder_message(first_name: &str) -> String {
    format!(
        "Hello {first_name}, this is a reminder to mark your attendance at the hostel. Thank you!"
    )
}

/// Stored settings, or the inactive default when none were ever saved.
pub async fn current_settings(db: &DatabaseConnection) -> ServiceResult<ReminderSettingsView> {
    if let Some(stored) = reminder_setting::Model::current(db).await? {
        return Ok(stored.into());
    }

    let default_time = parse_reminder_time(&config::default_reminder_time())
        .unwrap_or_else(|_| NaiveTime::from_hms_opt(20, 0, 0).unwrap_or(NaiveTime::MIN));
    Ok(ReminderSettingsView {
        reminder_time: default_time.format(TIME_FORMAT).to_string(),
        is_active: false,
        created_by: None,
        updated_at: None,
    })
}

/// Validates and writes the singleton settings row.
///
/// Callers holding a scheduler go through `ReminderScheduler::apply_settings` instead.
pub async fn save_settings(
    db: &DatabaseConnection,
    updated_by: i64,
    reminder_time: &str,
    is_active: bool,
) -> ServiceResult<reminder_setting::Model> {
    if reminder_time.trim().is_empty() {
        return Err(ServiceError::MissingFields("reminder_time".into()));
    }
    let at = parse_reminder_time(reminder_time)?;

    let saved = reminder_setting::Model::upsert(db, at, is_active, Some(updated_by)).await?;
    info!(
        reminder_time = %saved.reminder_time,
        is_active = saved.is_active,
        updated_by,
        "Reminder settings saved"
    );
    Ok(saved)
}

fn attempt_of(outcome: DeliveryOutcome) -> Attempt {
    match outcome {
        DeliveryOutcome::Delivered { reference } => Attempt {
            status: DeliveryStatus::Sent,
            simulated: false,
            provider_reference: reference,
            error: None,
        },
        DeliveryOutcome::Simulated => Attempt {
            status: DeliveryStatus::Sent,
            simulated: true,
            provider_reference: None,
            error: None,
        },
        DeliveryOutcome::Failed { error } => Attempt {
            status: DeliveryStatus::Failed,
            simulated: false,
            provider_reference: None,
            error: Some(error),
        },
    }
}

/// Sends one reminder to every student with a phone number and logs each attempt.
///
/// Transport failures are recorded as `failed` rows, never returned as errors. An
/// attempt whose row cannot be written is counted in `log_failures` as well as in
/// `sent` or `failed`. Up to `concurrency` sends are in flight at once.
pub async fn dispatch(
    db: &DatabaseConnection,
    clock: &dyn Clock,
    transport: &dyn SmsTransport,
    concurrency: usize,
) -> ServiceResult<DispatchReport> {
    let students = student::Model::list_reachable(db).await?;
    info!(
        recipients = students.len(),
        transport = transport.name(),
        "Dispatching attendance reminders"
    );

    let attempts: Vec<(Attempt, bool)> = stream::iter(students)
        .map(|s| async move {
            let phone = s.reminder_phone().unwrap_or_default().to_owned();
            let message = reminder_message(&s.first_name);
            let attempt = attempt_of(transport.send(&phone, &message).await);

            let logged =
                sms_log::Model::record(db, s.id, &phone, &message, attempt.clone(), clock.now())
                    .await;
            if let Err(e) = &logged {
                error!(student_id = s.id, error = %e, "Failed to record SMS delivery attempt");
            }
            (attempt, logged.is_ok())
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    let mut report = DispatchReport {
        attempted: attempts.len(),
        ..Default::default()
    };
    for (a, logged) in &attempts {
        if !logged {
            report.log_failures += 1;
        }
        match a.status {
            DeliveryStatus::Sent => report.sent += 1,
            DeliveryStatus::Failed => report.failed += 1,
        }
        if a.simulated {
            report.simulated += 1;
        }
    }

    info!(
        attempted = report.attempted,
        sent = report.sent,
        failed = report.failed,
        simulated = report.simulated,
        log_failures = report.log_failures,
        "Reminder dispatch finished"
    );
    Ok(report)
}

/// Delivery log, newest first.
pub async fn delivery_logs(
    db: &DatabaseConnection,
    student_id: Option<i64>,
    limit: Option<u64>,
) -> ServiceResult<Vec<SmsLogEntry>> {
    let limit = limit.unwrap_or(DEFAULT_LOG_LIMIT).clamp(1, 1000);
    let rows = sms_log::Model::list(db, student_id, limit).await?;
    Ok(rows
        .into_iter()
        .map(|(log, student)| SmsLogEntry {
            log,
            student_number: student.as_ref().map(|s| s.student_number.clone()),
            student_name: student.as_ref().map(|s| s.full_name()),
        })
        .collect())
}
