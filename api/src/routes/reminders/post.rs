use crate::response::{ApiResult, ok};
use crate::state::AppState;
use axum::extract::State;
use services::reminder::DispatchReport;

/// POST /reminders/test
///
/// Sends the attendance reminder to every student with a phone number right away, even
/// while the daily schedule is inactive. Individual delivery failures are counted in the
/// report and logged, not returned as errors.
///
/// ```json
/// { "attempted": 12, "sent": 11, "failed": 1, "simulated": 0, "log_failures": 0 }
/// ```
pub async fn send_now(State(app_state): State<AppState>) -> ApiResult<DispatchReport> {
    let report = app_state.scheduler().send_now().await?;
    ok(report, "Test reminders sent successfully")
}
