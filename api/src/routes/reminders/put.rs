use crate::auth::AuthUser;
use crate::extract::Json;
use crate::response::{ApiResult, ok};
use crate::routes::reminders::common::{ReminderStatus, UpdateSettingsRequest};
use crate::state::AppState;
use axum::{Extension, extract::State};

/// PUT /reminders
///
/// Saves the settings and re-arms the daily timer to match.
///
/// ### Request Body
/// ```json
/// { "reminder_time": "20:00", "is_active": true }
/// ```
///
/// ### Responses
/// - `200 OK` with the saved settings and next run
/// - `400 Bad Request` for a missing or malformed `reminder_time`
pub async fn update_settings(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<UpdateSettingsRequest>,
) -> ApiResult<ReminderStatus> {
    let scheduler = app_state.scheduler();
    let saved = scheduler
        .apply_settings(user.0.sub, &req.reminder_time, req.is_active.unwrap_or(true))
        .await?;
    let next_run = scheduler.next_run().await;

    ok(
        ReminderStatus {
            settings: saved.into(),
            next_run,
        },
        "Reminder settings updated successfully",
    )
}
