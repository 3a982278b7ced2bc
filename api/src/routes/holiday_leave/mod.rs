//! `/holiday-leave` routes.
//!
//! - `POST /holiday-leave` (student) → `apply_for_leave`
//! - `GET /holiday-leave` (admin, warden) → `list_applications`
//! - `GET /holiday-leave/my-applications` (student) → `my_applications`
//! - `PUT /holiday-leave/{application_id}` (admin, warden) → `review_application`
//! - `DELETE /holiday-leave/{application_id}` (student, pending only) → `cancel_application`

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use crate::auth::guards::{allow_staff, allow_student};
use crate::state::AppState;
use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post, put},
};

use delete::cancel_application;
use get::{list_applications, my_applications};
use post::apply_for_leave;
use put::review_application;

pub fn holiday_leave_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(apply_for_leave).route_layer(from_fn(allow_student)))
        .route("/", get(list_applications).route_layer(from_fn(allow_staff)))
        .route("/my-applications", get(my_applications).route_layer(from_fn(allow_student)))
        .route("/{application_id}", put(review_application).route_layer(from_fn(allow_staff)))
        .route("/{application_id}", delete(cancel_application).route_layer(from_fn(allow_student)))
}
