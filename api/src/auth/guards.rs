use crate::auth::claims::AuthUser;
use crate::response::{ApiResponse, Empty};
use axum::{
    Json,
    body::Body,
    extract::FromRequestParts,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use db::models::user::Role;
use services::access::{self, ADMIN_ONLY, STAFF, STUDENT_ONLY};
use tracing::warn;

type GuardRejection = (StatusCode, Json<ApiResponse<Empty>>);

/// Validates the bearer token and stores the resulting `AuthUser` in the request extensions.
async fn extract_and_insert_authuser(
    req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), GuardRejection> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|(_, reason)| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error(reason)),
            )
        })?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

/// Authenticates the caller, then admits them only if their role is in `roles`.
pub async fn allow_roles(
    req: Request<Body>,
    next: Next,
    roles: &[Role],
) -> Result<Response, GuardRejection> {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if let Err(e) = access::require_role(&user.principal(), roles) {
        warn!(
            user_id = user.0.sub,
            role = %user.0.role,
            path = %req.uri().path(),
            "Access denied"
        );
        return Err((StatusCode::FORBIDDEN, Json(ApiResponse::error(e.to_string()))));
    }

    Ok(next.run(req).await)
}

/// Any valid token.
pub async fn allow_authenticated(
    req: Request<Body>,
    next: Next,
) -> Result<Response, GuardRejection> {
    let (req, _user) = extract_and_insert_authuser(req).await?;

    Ok(next.run(req).await)
}

/// Admins and wardens.
pub async fn allow_staff(req: Request<Body>, next: Next) -> Result<Response, GuardRejection> {
    allow_roles(req, next, STAFF).await
}

pub async fn allow_admin(req: Request<Body>, next: Next) -> Result<Response, GuardRejection> {
    allow_roles(req, next, ADMIN_ONLY).await
}

pub async fn allow_warden(req: Request<Body>, next: Next) -> Result<Response, GuardRejection> {
    allow_roles(req, next, &[Role::Warden]).await
}

pub async fn allow_student(req: Request<Body>, next: Next) -> Result<Response, GuardRejection> {
    allow_roles(req, next, STUDENT_ONLY).await
}
