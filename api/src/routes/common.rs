//! Helpers shared by the route groups.

use crate::auth::AuthUser;
use crate::response::ApiError;
use crate::state::AppState;
use chrono::NaiveDate;
use db::models::student;
use services::{accounts, input};

/// The student profile belonging to the authenticated caller.
pub async fn caller_student(
    app_state: &AppState,
    user: &AuthUser,
) -> Result<student::Model, ApiError> {
    Ok(accounts::student_for_user(app_state.db(), user.0.sub).await?)
}

/// Parses an optional `YYYY-MM-DD` query value; blank counts as absent.
pub fn optional_date(field: &'static str, raw: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => Ok(Some(input::parse_date(field, value)?)),
        None => Ok(None),
    }
}
