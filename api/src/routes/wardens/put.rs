use crate::extract::{Json, Path};
use crate::response::{ApiResult, ok};
use crate::routes::wardens::common::UpdateWardenRequest;
use crate::state::AppState;
use axum::extract::State;
use db::models::warden;
use services::accounts;

/// PUT /wardens/{warden_id}
pub async fn update_warden(
    State(app_state): State<AppState>,
    Path(warden_id): Path<i64>,
    Json(req): Json<UpdateWardenRequest>,
) -> ApiResult<warden::Model> {
    let updated = accounts::update_warden(
        app_state.db(),
        warden_id,
        req.first_name,
        req.last_name,
        req.phone_number,
    )
    .await?;
    ok(updated, "Warden updated successfully")
}
