use crate::auth::AuthUser;
use crate::extract::Query;
use crate::response::{ApiResult, ok};
use crate::routes::common::caller_student;
use crate::routes::holiday_leave::common::ApplicationListQuery;
use crate::state::AppState;
use axum::{Extension, extract::State};
use services::holiday_leave::{self as workflow, ApplicationFilter, HolidayLeaveEntry};

/// GET /holiday-leave?status=&student_id=
///
/// Applications newest first, with student details and reviewer username.
///
/// ### Responses
/// - `200 OK`
/// - `400 Bad Request` for a `status` other than `pending`, `approved` or `rejected`
pub async fn list_applications(
    State(app_state): State<AppState>,
    Query(query): Query<ApplicationListQuery>,
) -> ApiResult<Vec<HolidayLeaveEntry>> {
    let status = match query.status.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(workflow::parse_status(raw)?),
        _ => None,
    };

    let filter = ApplicationFilter {
        status,
        student_id: query.student_id,
    };
    let applications = workflow::list(app_state.db(), filter).await?;
    ok(applications, "Leave applications retrieved successfully")
}

/// GET /holiday-leave/my-applications
pub async fn my_applications(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<HolidayLeaveEntry>> {
    let student = caller_student(&app_state, &user).await?;
    let applications = workflow::list_for_student(app_state.db(), student.id).await?;
    ok(applications, "Leave applications retrieved successfully")
}
