//! `/college-leave` routes.
//!
//! - `POST /college-leave` (student) → `declare_inside_hostel`
//! - `GET /college-leave` (admin, warden) → `list_records`
//! - `GET /college-leave/my-records` (student) → `my_records`
//! - `DELETE /college-leave/{record_id}` (student, today's record only) → `revoke_record`

pub mod common;
pub mod delete;
pub mod get;
pub mod post;

use crate::auth::guards::{allow_staff, allow_student};
use crate::state::AppState;
use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post},
};

use delete::revoke_record;
use get::{list_records, my_records};
use post::declare_inside_hostel;

pub fn college_leave_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(declare_inside_hostel).route_layer(from_fn(allow_student)))
        .route("/", get(list_records).route_layer(from_fn(allow_staff)))
        .route("/my-records", get(my_records).route_layer(from_fn(allow_student)))
        .route("/{record_id}", delete(revoke_record).route_layer(from_fn(allow_student)))
}
