use crate::auth::AuthUser;
use crate::extract::Json;
use crate::response::{ApiResult, created};
use crate::routes::common::caller_student;
use crate::routes::holiday_leave::common::ApplyRequest;
use crate::state::AppState;
use axum::{Extension, extract::State};
use db::models::holiday_leave;
use services::holiday_leave as workflow;

/// POST /holiday-leave
///
/// ### Request Body
/// ```json
/// { "from_date": "2024-06-15", "to_date": "2024-06-17", "reason": "Family function" }
/// ```
///
/// ### Responses
/// - `201 Created` with the `pending` application
/// - `400 Bad Request` for missing fields, malformed dates, `to_date` before `from_date`,
///   or a reason shorter than 3 characters
pub async fn apply_for_leave(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<ApplyRequest>,
) -> ApiResult<holiday_leave::Model> {
    let student = caller_student(&app_state, &user).await?;
    let application = workflow::apply(
        app_state.db(),
        app_state.clock(),
        student.id,
        &req.from_date,
        &req.to_date,
        &req.reason,
    )
    .await?;
    created(application, "Holiday leave application submitted successfully")
}
