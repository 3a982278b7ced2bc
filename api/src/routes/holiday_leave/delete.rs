use crate::auth::AuthUser;
use crate::extract::Path;
use crate::response::{ApiResult, Empty, ok};
use crate::routes::common::caller_student;
use crate::state::AppState;
use axum::{Extension, extract::State};
use services::holiday_leave as workflow;

/// DELETE /holiday-leave/{application_id}
///
/// ### Responses
/// - `200 OK`
/// - `400 Bad Request` once the application has been reviewed
/// - `404 Not Found` when it does not exist or belongs to another student
pub async fn cancel_application(
    State(app_state): State<AppState>,
    Path(application_id): Path<i64>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Empty> {
    let student = caller_student(&app_state, &user).await?;
    workflow::cancel(app_state.db(), student.id, application_id).await?;
    ok(Empty, "Leave application cancelled successfully")
}
