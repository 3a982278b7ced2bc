use crate::extract::Query;
use crate::response::{ApiResult, ok};
use crate::routes::reminders::common::{LogListQuery, ReminderStatus};
use crate::state::AppState;
use axum::extract::State;
use services::reminder::{self, SmsLogEntry};

/// GET /reminders
///
/// ```json
/// { "reminder_time": "20:00:00", "is_active": false, "created_by": null,
///   "updated_at": null, "next_run": null }
/// ```
pub async fn get_settings(State(app_state): State<AppState>) -> ApiResult<ReminderStatus> {
    let settings = reminder::current_settings(app_state.db()).await?;
    let next_run = app_state.scheduler().next_run().await;
    ok(
        ReminderStatus { settings, next_run },
        "Reminder settings retrieved successfully",
    )
}

/// GET /reminders/logs?student_id=&limit=
///
/// Delivery attempts newest first; `limit` defaults to 50.
pub async fn delivery_logs(
    State(app_state): State<AppState>,
    Query(query): Query<LogListQuery>,
) -> ApiResult<Vec<SmsLogEntry>> {
    let logs = reminder::delivery_logs(app_state.db(), query.student_id, query.limit).await?;
    ok(logs, "SMS logs retrieved successfully")
}
