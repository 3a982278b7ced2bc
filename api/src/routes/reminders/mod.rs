//! `/reminders` routes, all restricted to admins and wardens.
//!
//! - `GET /reminders` → `get_settings`
//! - `PUT /reminders` → `update_settings`
//! - `POST /reminders/test` → `send_now`
//! - `GET /reminders/logs` → `delivery_logs`

pub mod common;
pub mod get;
pub mod post;
pub mod put;

use crate::auth::guards::allow_staff;
use crate::state::AppState;
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post, put},
};

use get::{delivery_logs, get_settings};
use post::send_now;
use put::update_settings;

pub fn reminder_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_settings))
        .route("/", put(update_settings))
        .route("/test", post(send_now))
        .route("/logs", get(delivery_logs))
        .route_layer(from_fn(allow_staff))
}
