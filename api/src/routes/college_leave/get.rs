use crate::auth::AuthUser;
use crate::extract::Query;
use crate::response::{ApiResult, ok};
use crate::routes::college_leave::common::RecordListQuery;
use crate::routes::common::{caller_student, optional_date};
use crate::state::AppState;
use axum::{Extension, extract::State};
use db::models::college_leave;
use services::college_leave::{self as register, CollegeLeaveEntry};

/// GET /college-leave?date=&student_id=
///
/// Records for one date, today when `date` is omitted.
pub async fn list_records(
    State(app_state): State<AppState>,
    Query(query): Query<RecordListQuery>,
) -> ApiResult<Vec<CollegeLeaveEntry>> {
    let date = optional_date("date", query.date.as_deref())?;
    let records =
        register::list(app_state.db(), app_state.clock(), date, query.student_id).await?;
    ok(records, "College leave records retrieved successfully")
}

/// GET /college-leave/my-records
///
/// The caller's 30 most recent records.
pub async fn my_records(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<college_leave::Model>> {
    let student = caller_student(&app_state, &user).await?;
    let records = register::list_for_student(app_state.db(), student.id).await?;
    ok(records, "College leave records retrieved successfully")
}
