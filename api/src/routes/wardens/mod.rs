//! `/wardens` routes.
//!
//! - `POST /wardens` (admin) → `create_warden`
//! - `GET /wardens` (admin) → `list_wardens`
//! - `GET /wardens/me/profile` (warden) → `get_my_profile`
//! - `PUT /wardens/{warden_id}` (admin) → `update_warden`
//! - `DELETE /wardens/{warden_id}` (admin) → `delete_warden`

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use crate::auth::guards::{allow_admin, allow_warden};
use crate::state::AppState;
use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post, put},
};

use delete::delete_warden;
use get::{get_my_profile, list_wardens};
use post::create_warden;
use put::update_warden;

pub fn warden_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_warden).route_layer(from_fn(allow_admin)))
        .route("/", get(list_wardens).route_layer(from_fn(allow_admin)))
        .route("/me/profile", get(get_my_profile).route_layer(from_fn(allow_warden)))
        .route("/{warden_id}", put(update_warden).route_layer(from_fn(allow_admin)))
        .route("/{warden_id}", delete(delete_warden).route_layer(from_fn(allow_admin)))
}
