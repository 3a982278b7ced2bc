use crate::extract::Json;
use crate::response::{ApiResult, created};
use crate::routes::attendance::common::{RfidLogRequest, RfidLogResponse};
use crate::state::AppState;
use axum::extract::State;
use services::ledger;

/// POST /attendance/rfid-log
///
/// Records one gate scan. Unauthenticated; called by the RFID reader.
///
/// ### Request Body
/// ```json
/// { "rfid_tag": "RFID-STU001", "log_type": "entry" }
/// ```
///
/// ### Responses
/// - `201 Created` with `{ id, student_id, log_type, timestamp }`
/// - `400 Bad Request` for a missing field or a `log_type` other than `entry`/`exit`
/// - `404 Not Found` for an unknown tag
pub async fn log_rfid_scan(
    State(app_state): State<AppState>,
    Json(req): Json<RfidLogRequest>,
) -> ApiResult<RfidLogResponse> {
    let event =
        ledger::record_event(app_state.db(), app_state.clock(), &req.rfid_tag, &req.log_type)
            .await?;
    created(event.into(), "Attendance logged successfully")
}
