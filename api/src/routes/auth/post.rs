use crate::auth::generate_jwt;
use crate::extract::Json;
use crate::response::{ApiError, ApiResult, ok};
use crate::state::AppState;
use axum::extract::State;
use common::format_validation_errors;
use db::models::user;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
    pub user: user::Model,
}

/// POST /auth/login
///
/// ### Request Body
/// ```json
/// { "username": "student1", "password": "student123" }
/// ```
///
/// ### Responses
/// - `200 OK` with `{ token, expires_at, user }`
/// - `400 Bad Request` when either field is blank
/// - `401 Unauthorized` for an unknown username or wrong password
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    if let Err(errors) = req.validate() {
        return Err(ApiError::Validation(format_validation_errors(&errors)));
    }

    let found = user::Model::find_by_username(app_state.db(), req.username.trim())
        .await
        .map_err(services::ServiceError::from)?;

    let Some(account) = found.filter(|u| u.verify_password(&req.password)) else {
        warn!(username = %req.username, "Login failed");
        return Err(ApiError::Unauthorized("Invalid credentials"));
    };

    let (token, expires_at) =
        generate_jwt(account.id, account.role).map_err(|e| ApiError::Internal(e.to_string()))?;

    info!(user_id = account.id, role = %account.role, "User logged in");
    ok(
        LoginResponse {
            token,
            expires_at,
            user: account,
        },
        "Login successful",
    )
}
