use crate::extract::Path;
use crate::response::{ApiResult, Empty, ok};
use crate::state::AppState;
use axum::extract::State;
use services::accounts;

/// DELETE /students/{student_id}
///
/// Removes the profile and its user account. Attendance, leave and SMS history go with it.
pub async fn delete_student(
    State(app_state): State<AppState>,
    Path(student_id): Path<i64>,
) -> ApiResult<Empty> {
    accounts::delete_student(app_state.db(), student_id).await?;
    ok(Empty, "Student deleted successfully")
}
