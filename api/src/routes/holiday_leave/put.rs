use crate::auth::AuthUser;
use crate::extract::{Json, Path};
use crate::response::{ApiResult, ok};
use crate::routes::holiday_leave::common::ReviewRequest;
use crate::state::AppState;
use axum::{Extension, extract::State};
use db::models::holiday_leave;
use services::holiday_leave as workflow;

/// PUT /holiday-leave/{application_id}
///
/// ### Request Body
/// ```json
/// { "status": "approved", "remarks": "Enjoy the break" }
/// ```
///
/// ### Responses
/// - `200 OK` with the decided application
/// - `400 Bad Request` for a `status` other than `approved`/`rejected`, or an application
///   that was already reviewed
/// - `404 Not Found`
pub async fn review_application(
    State(app_state): State<AppState>,
    Path(application_id): Path<i64>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<ReviewRequest>,
) -> ApiResult<holiday_leave::Model> {
    let decided = workflow::review(
        app_state.db(),
        app_state.clock(),
        application_id,
        user.0.sub,
        &req.status,
        req.remarks.as_deref(),
    )
    .await?;
    let message = format!("Leave application {}", decided.status);
    ok(decided, message)
}
