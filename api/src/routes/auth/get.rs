use crate::auth::AuthUser;
use crate::response::{ApiResult, ok};
use crate::state::AppState;
use axum::{Extension, extract::State};
use db::models::user;
use services::ServiceError;

/// GET /auth/me
///
/// Returns the authenticated user's account record.
///
/// ### Responses
/// - `200 OK` with the user (password hash omitted)
/// - `401 Unauthorized` without a valid token
/// - `404 Not Found` when the account was deleted after the token was issued
pub async fn get_me(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<user::Model> {
    let account = user::Model::get_by_id(app_state.db(), user.0.sub)
        .await
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound("User"))?;

    ok(account, "User data retrieved successfully")
}
