use crate::extract::Path;
use crate::response::{ApiResult, Empty, ok};
use crate::state::AppState;
use axum::extract::State;
use services::accounts;

/// DELETE /wardens/{warden_id}
///
/// Removes the warden profile and its user account together.
pub async fn delete_warden(
    State(app_state): State<AppState>,
    Path(warden_id): Path<i64>,
) -> ApiResult<Empty> {
    accounts::delete_warden(app_state.db(), warden_id).await?;
    ok(Empty, "Warden deleted successfully")
}
