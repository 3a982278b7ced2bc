use crate::extract::{Json, Path};
use crate::response::{ApiResult, ok};
use crate::routes::students::common::UpdateStudentRequest;
use crate::state::AppState;
use axum::extract::State;
use db::models::student;
use services::accounts;

/// PUT /students/{student_id}
///
/// Updates the supplied profile fields; omitted fields keep their value.
///
/// ### Responses
/// - `200 OK` with the updated profile
/// - `400 Bad Request` for a malformed `date_of_birth` or an RFID tag already in use
/// - `404 Not Found`
pub async fn update_student(
    State(app_state): State<AppState>,
    Path(student_id): Path<i64>,
    Json(req): Json<UpdateStudentRequest>,
) -> ApiResult<student::Model> {
    let changes = req.into_changes()?;
    let updated = accounts::update_student(app_state.db(), student_id, changes).await?;
    ok(updated, "Student updated successfully")
}
