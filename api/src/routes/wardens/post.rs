use crate::extract::Json;
use crate::response::{ApiResult, created};
use crate::routes::wardens::common::CreateWardenRequest;
use crate::state::AppState;
use axum::extract::State;
use services::accounts::{self, Credentials, WardenAccount};

/// POST /wardens
///
/// ### Request Body
/// ```json
/// {
///   "username": "warden2", "email": "w2@hostel.com", "password": "secret123",
///   "first_name": "Meena", "last_name": "Iyer", "phone_number": "+919900000002"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with `{ user, warden }`
/// - `400 Bad Request` for missing fields or a duplicate username or email
pub async fn create_warden(
    State(app_state): State<AppState>,
    Json(req): Json<CreateWardenRequest>,
) -> ApiResult<WardenAccount> {
    let credentials = Credentials {
        username: req.username.trim().to_owned(),
        email: req.email.trim().to_owned(),
        password: req.password,
    };

    let account = accounts::enroll_warden(
        app_state.db(),
        credentials,
        req.first_name.trim(),
        req.last_name.trim(),
        req.phone_number.as_deref(),
    )
    .await?;

    created(account, "Warden created successfully")
}
