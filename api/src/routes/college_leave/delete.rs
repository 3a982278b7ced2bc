use crate::auth::AuthUser;
use crate::extract::Path;
use crate::response::{ApiResult, Empty, ok};
use crate::routes::common::caller_student;
use crate::state::AppState;
use axum::{Extension, extract::State};
use services::college_leave as register;

/// DELETE /college-leave/{record_id}
///
/// ### Responses
/// - `200 OK`
/// - `400 Bad Request` when the record is not dated today
/// - `404 Not Found` when the record does not exist or belongs to someone else
pub async fn revoke_record(
    State(app_state): State<AppState>,
    Path(record_id): Path<i64>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Empty> {
    let student = caller_student(&app_state, &user).await?;
    register::revoke(app_state.db(), app_state.clock(), student.id, record_id).await?;
    ok(Empty, "College leave deleted successfully")
}
