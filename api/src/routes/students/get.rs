use crate::auth::AuthUser;
use crate::extract::Path;
use crate::response::{ApiResult, ok};
use crate::routes::common::caller_student;
use crate::routes::students::common::StudentDetail;
use crate::state::AppState;
use axum::{Extension, extract::State};
use db::models::{student, user};
use services::ServiceError;
use services::access::{self, STAFF};
use services::accounts::{self, StudentOverview};

async fn detail_of(app_state: &AppState, student: student::Model) -> Result<StudentDetail, ServiceError> {
    let owner = user::Model::get_by_id(app_state.db(), student.user_id).await?;
    Ok(StudentDetail {
        username: owner.as_ref().map(|u| u.username.clone()),
        email: owner.map(|u| u.email),
        student,
    })
}

/// GET /students
///
/// Every student with login details and last gate scan, ordered by student number.
pub async fn list_students(State(app_state): State<AppState>) -> ApiResult<Vec<StudentOverview>> {
    let students = accounts::student_overview(app_state.db()).await?;
    ok(students, "Students retrieved successfully")
}

/// GET /students/me/profile
pub async fn get_my_profile(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<StudentDetail> {
    let student = caller_student(&app_state, &user).await?;
    ok(detail_of(&app_state, student).await?, "Profile retrieved successfully")
}

/// GET /students/{student_id}
///
/// Students may only read their own profile; admins and wardens may read any.
///
/// ### Responses
/// - `200 OK`
/// - `403 Forbidden` for another student's profile
/// - `404 Not Found`
pub async fn get_student(
    State(app_state): State<AppState>,
    Path(student_id): Path<i64>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<StudentDetail> {
    let student = accounts::student_by_id(app_state.db(), student_id).await?;
    access::require_owner_or_role(&user.principal(), Some(student.user_id), STAFF)?;
    ok(detail_of(&app_state, student).await?, "Student retrieved successfully")
}
