//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → liveness probe (public)
//! - `/auth` → login (public) and current user
//! - `/students`, `/wardens` → profile management
//! - `/attendance` → RFID gate log (public device endpoint), logs and presence
//! - `/college-leave`, `/holiday-leave` → leave registers
//! - `/reminders` → reminder settings, manual dispatch, delivery log

use crate::routes::{
    attendance::attendance_routes, auth::auth_routes, college_leave::college_leave_routes,
    health::health_routes, holiday_leave::holiday_leave_routes, reminders::reminder_routes,
    students::student_routes, wardens::warden_routes,
};
use crate::state::AppState;
use axum::Router;

pub mod attendance;
pub mod auth;
pub mod college_leave;
pub mod common;
pub mod health;
pub mod holiday_leave;
pub mod reminders;
pub mod students;
pub mod wardens;

/// Builds the router mounted under `/api`. Role guards are attached per route inside
/// each group.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/students", student_routes())
        .nest("/wardens", warden_routes())
        .nest("/attendance", attendance_routes())
        .nest("/college-leave", college_leave_routes())
        .nest("/holiday-leave", holiday_leave_routes())
        .nest("/reminders", reminder_routes())
        .with_state(app_state)
}
