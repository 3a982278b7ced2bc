use crate::auth::AuthUser;
use crate::extract::Query;
use crate::response::{ApiResult, ok};
use crate::routes::attendance::common::LogListQuery;
use crate::routes::common::caller_student;
use crate::state::AppState;
use axum::{Extension, extract::State};
use services::ledger::{self, LogEntry};
use services::presence::{self, PresenceStatus};

/// GET /attendance?student_id=&from_date=&to_date=&limit=
///
/// Gate scans newest first. Dates are hostel-local calendar days, inclusive; `limit`
/// defaults to 100 and is clamped to 1..=1000.
///
/// ### Responses
/// - `200 OK`
/// - `400 Bad Request` for a malformed date or `from_date` after `to_date`
pub async fn list_logs(
    State(app_state): State<AppState>,
    Query(query): Query<LogListQuery>,
) -> ApiResult<Vec<LogEntry>> {
    let logs = ledger::list_events(app_state.db(), app_state.clock(), query.into_filter()?).await?;
    ok(logs, "Attendance logs retrieved successfully")
}

/// GET /attendance/my-logs?from_date=&to_date=&limit=
///
/// The caller's own scans; any `student_id` in the query is ignored.
pub async fn my_logs(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<LogListQuery>,
) -> ApiResult<Vec<LogEntry>> {
    let student = caller_student(&app_state, &user).await?;
    let mut filter = query.into_filter()?;
    filter.student_id = Some(student.id);

    let logs = ledger::list_events(app_state.db(), app_state.clock(), filter).await?;
    ok(logs, "Attendance logs retrieved successfully")
}

/// GET /attendance/current-status
///
/// Today's presence verdict for every student.
///
/// ```json
/// [{ "student_id": 1, "student_number": "STU001", "present": true,
///    "display": "Inside Hostel (College Leave)", "source": "college_leave", ... }]
/// ```
pub async fn current_status(State(app_state): State<AppState>) -> ApiResult<Vec<PresenceStatus>> {
    let roster = presence::roster(app_state.db(), app_state.clock()).await?;
    ok(roster, "Current status retrieved successfully")
}

/// GET /attendance/my-status
pub async fn my_status(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<PresenceStatus> {
    let student = caller_student(&app_state, &user).await?;
    let status = presence::resolve(app_state.db(), app_state.clock(), student.id, None).await?;
    ok(status, "Status retrieved successfully")
}
