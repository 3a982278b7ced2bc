use crate::auth::AuthUser;
use crate::extract::Json;
use crate::response::{ApiResult, created};
use crate::routes::college_leave::common::DeclareRequest;
use crate::routes::common::caller_student;
use crate::state::AppState;
use axum::{Extension, extract::State};
use db::models::college_leave;
use services::college_leave as register;

/// POST /college-leave
///
/// Declares that the caller stays inside the hostel today instead of attending college.
/// Declaring again the same day replaces the reason.
///
/// ### Request Body
/// ```json
/// { "date": "2024-06-10", "reason": "Fever" }
/// ```
///
/// ### Responses
/// - `201 Created` with the stored record
/// - `400 Bad Request` when `date` is malformed, not today, or a weekend, or the reason is
///   shorter than 3 characters
pub async fn declare_inside_hostel(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<DeclareRequest>,
) -> ApiResult<college_leave::Model> {
    let student = caller_student(&app_state, &user).await?;
    let record = register::declare_inside_hostel(
        app_state.db(),
        app_state.clock(),
        student.id,
        &req.date,
        &req.reason,
    )
    .await?;
    created(record, "College leave marked successfully")
}
