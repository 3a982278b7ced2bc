use crate::auth::AuthUser;
use crate::response::{ApiResult, ok};
use crate::state::AppState;
use axum::{Extension, extract::State};
use db::models::warden;
use services::accounts;

/// GET /wardens
pub async fn list_wardens(State(app_state): State<AppState>) -> ApiResult<Vec<warden::Model>> {
    let wardens = accounts::wardens(app_state.db()).await?;
    ok(wardens, "Wardens retrieved successfully")
}

/// GET /wardens/me/profile
pub async fn get_my_profile(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<warden::Model> {
    let warden = accounts::warden_for_user(app_state.db(), user.0.sub).await?;
    ok(warden, "Profile retrieved successfully")
}
