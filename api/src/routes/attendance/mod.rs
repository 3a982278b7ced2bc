//! `/attendance` routes.
//!
//! - `POST /attendance/rfid-log` (public, called by the gate reader) → `log_rfid_scan`
//! - `GET /attendance` (admin, warden) → `list_logs`
//! - `GET /attendance/my-logs` (student) → `my_logs`
//! - `GET /attendance/current-status` (admin, warden) → `current_status`
//! - `GET /attendance/my-status` (student) → `my_status`

pub mod common;
pub mod get;
pub mod post;

use crate::auth::guards::{allow_staff, allow_student};
use crate::state::AppState;
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};

use get::{current_status, list_logs, my_logs, my_status};
use post::log_rfid_scan;

pub fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/rfid-log", post(log_rfid_scan))
        .route("/", get(list_logs).route_layer(from_fn(allow_staff)))
        .route("/my-logs", get(my_logs).route_layer(from_fn(allow_student)))
        .route("/current-status", get(current_status).route_layer(from_fn(allow_staff)))
        .route("/my-status", get(my_status).route_layer(from_fn(allow_student)))
}
