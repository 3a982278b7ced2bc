use crate::extract::Json;
use crate::response::{ApiResult, created};
use crate::routes::students::common::CreateStudentRequest;
use crate::state::AppState;
use axum::extract::State;
use services::accounts::{self, StudentAccount};

/// POST /students
///
/// Creates the student's user account and profile together.
///
/// ### Request Body
/// ```json
/// {
///   "username": "student2", "email": "s2@hostel.com", "password": "secret123",
///   "student_number": "STU002", "first_name": "Ravi", "last_name": "Patel",
///   "phone_number": "+919900000011", "room_number": "A-102", "rfid_tag": "RFID-STU002"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with `{ user, student }`
/// - `400 Bad Request` for missing fields or a duplicate username, email, student number or RFID tag
pub async fn create_student(
    State(app_state): State<AppState>,
    Json(req): Json<CreateStudentRequest>,
) -> ApiResult<StudentAccount> {
    let (credentials, profile) = req.into_parts()?;
    let account = accounts::enroll_student(app_state.db(), credentials, profile).await?;
    created(account, "Student created successfully")
}
