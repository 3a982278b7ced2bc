use chrono::NaiveDate;
use sea_orm::DbErr;
use thiserror::Error;

/// Coarse classification used by the HTTP layer to choose a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Authorization,
    StorageUnavailable,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Missing required fields: {0}")]
    MissingFields(String),

    #[error("Invalid date format for {0}. Use YYYY-MM-DD")]
    InvalidDateFormat(&'static str),

    #[error("To date ({to}) must be on or after from date ({from})")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    #[error("Reason must be at least 3 characters")]
    ReasonTooShort,

    #[error("College leave can only be declared for today ({today})")]
    DateNotToday { today: NaiveDate },

    #[error("College leave is only available on working days (Monday to Friday)")]
    NotWorkingDay,

    #[error("Invalid log type. Must be 'entry' or 'exit'")]
    InvalidDirection,

    #[error("Unknown RFID tag")]
    UnknownRfidTag,

    #[error("Invalid status. Must be 'approved' or 'rejected'")]
    InvalidStatus,

    #[error("Invalid reminder time. Use HH:MM or HH:MM:SS")]
    InvalidReminderTime,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Leave application has already been reviewed")]
    AlreadyReviewed,

    #[error("Only pending applications can be cancelled")]
    NotCancellable,

    #[error("Only today's college leave record can be deleted")]
    NotRevocable,

    #[error("{0} already exists")]
    Duplicate(String),

    #[error("Forbidden: insufficient permissions")]
    Forbidden,

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] DbErr),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::MissingFields(_)
            | ServiceError::InvalidDateFormat(_)
            | ServiceError::InvalidRange { .. }
            | ServiceError::ReasonTooShort
            | ServiceError::DateNotToday { .. }
            | ServiceError::NotWorkingDay
            | ServiceError::InvalidDirection
            | ServiceError::InvalidStatus
            | ServiceError::InvalidReminderTime => ErrorKind::Validation,
            ServiceError::NotFound(_) | ServiceError::UnknownRfidTag => ErrorKind::NotFound,
            ServiceError::AlreadyReviewed
            | ServiceError::NotCancellable
            | ServiceError::NotRevocable
            | ServiceError::Duplicate(_) => ErrorKind::Conflict,
            ServiceError::Forbidden => ErrorKind::Authorization,
            ServiceError::StorageUnavailable(_) => ErrorKind::StorageUnavailable,
        }
    }

    /// Maps a unique-constraint violation to `Duplicate`, anything else to storage failure.
    pub fn from_insert(err: DbErr) -> Self {
        match unique_violation(&err) {
            Some(what) => ServiceError::Duplicate(what),
            None => ServiceError::StorageUnavailable(err),
        }
    }
}

impl From<util::dates::InvalidRange> for ServiceError {
    fn from(err: util::dates::InvalidRange) -> Self {
        ServiceError::InvalidRange {
            from: err.from,
            to: err.to,
        }
    }
}

/// Extracts a readable field name from a SQLite `UNIQUE constraint failed: table.column` error.
fn unique_violation(err: &DbErr) -> Option<String> {
    let message = err.to_string();

    let rest = message.split("UNIQUE constraint failed:").nth(1)?;
    let column = rest
        .split(',')
        .next()
        .and_then(|c| c.trim().rsplit('.').next())
        .unwrap_or("Record");

    let label = match column {
        "username" => "Username",
        "email" => "Email",
        "student_number" => "Student number",
        "rfid_tag" => "RFID tag",
        "user_id" => "Profile",
        _ => "Record",
    };
    Some(label.to_owned())
}

pub type ServiceResult<T> = Result<T, ServiceError>;
