use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use services::{ErrorKind, ServiceError};
use tracing::{error, warn};

/// Standard JSON envelope for every response:
///
/// ```json
/// { "success": true, "data": { ... }, "message": "Student created successfully" }
/// ```
///
/// Error responses carry `success: false`, an empty `data` and a client-safe `message`.
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    /// Error envelope; `T` must be `Default` since error responses carry no payload.
    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }
}

#[derive(Serialize, Default)]
pub struct Empty;

/// Handler failure, rendered as an `ApiResponse<Empty>` with the matching status.
#[derive(Debug)]
pub enum ApiError {
    Service(ServiceError),
    /// Request body failed declarative validation.
    Validation(String),
    Unauthorized(&'static str),
    /// Unexpected failure outside the service layer; the detail is logged, never returned.
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Service(err)
    }
}

pub type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

pub fn ok<T: Serialize>(data: T, message: impl Into<String>) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::success(data, message))))
}

pub fn created<T: Serialize>(data: T, message: impl Into<String>) -> ApiResult<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::success(data, message))))
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation | ErrorKind::Conflict => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Authorization => StatusCode::FORBIDDEN,
        ErrorKind::StorageUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

const SERVER_ERROR: &str = "Server error";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Service(err) => {
                let status = status_for(err.kind());
                if status.is_server_error() {
                    error!(error = %err, "Request failed");
                    (status, SERVER_ERROR.to_owned())
                } else {
                    warn!(error = %err, status = status.as_u16(), "Request rejected");
                    (status, err.to_string())
                }
            }
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message.to_owned()),
            ApiError::Internal(detail) => {
                error!(error = %detail, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR.to_owned())
            }
        };

        (status, Json(ApiResponse::<Empty>::error(message))).into_response()
    }
}
