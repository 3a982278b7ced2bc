//! `/students` routes.
//!
//! - `POST /students` (admin, warden) → `create_student`
//! - `GET /students` (admin, warden) → `list_students`
//! - `GET /students/me/profile` (student) → `get_my_profile`
//! - `GET /students/{student_id}` (owner, admin, warden) → `get_student`
//! - `PUT /students/{student_id}` (admin, warden) → `update_student`
//! - `DELETE /students/{student_id}` (admin) → `delete_student`

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use crate::auth::guards::{allow_admin, allow_authenticated, allow_staff, allow_student};
use crate::state::AppState;
use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post, put},
};

use delete::delete_student;
use get::{get_my_profile, get_student, list_students};
use post::create_student;
use put::update_student;

pub fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_student).route_layer(from_fn(allow_staff)))
        .route("/", get(list_students).route_layer(from_fn(allow_staff)))
        .route("/me/profile", get(get_my_profile).route_layer(from_fn(allow_student)))
        .route("/{student_id}", get(get_student).route_layer(from_fn(allow_authenticated)))
        .route("/{student_id}", put(update_student).route_layer(from_fn(allow_staff)))
        .route("/{student_id}", delete(delete_student).route_layer(from_fn(allow_admin)))
}
