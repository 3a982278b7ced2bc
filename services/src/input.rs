//! Shared checks on raw request fields.

use crate::error::{ServiceError, ServiceResult};
use chrono::NaiveDate;
use util::dates::parse_calendar_date;

pub const MIN_REASON_LEN: usize = 3;

/// Fails with `MissingFields` naming every blank entry of `fields`.
pub fn require_fields(fields: &[(&str, &str)]) -> ServiceResult<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::MissingFields(missing.join(", ")))
    }
}

pub fn parse_date(field: &'static str, raw: &str) -> ServiceResult<NaiveDate> {
    parse_calendar_date(raw.trim()).ok_or(ServiceError::InvalidDateFormat(field))
}

/// Returns the trimmed reason, or `ReasonTooShort`.
pub fn reason(raw: &str) -> ServiceResult<&str> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < MIN_REASON_LEN {
        return Err(ServiceError::ReasonTooShort);
    }
    Ok(trimmed)
}

/// Trimmed remarks, with blank treated as absent.
pub fn optional_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}
