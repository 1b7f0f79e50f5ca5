use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use tracing::error;

use crate::domain::ValidationError;
use crate::postnl::ProviderError;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal address check error";
pub const UPSTREAM_ERROR_MESSAGE: &str = "PostNL error";

#[derive(Debug)]
pub enum ApiError {
    MethodNotAllowed,
    Unauthorized,
    BadRequest(String),
    /// Non-2xx answer from PostNL, relayed with its status and body
    Upstream { status: StatusCode, data: Option<Value> },
    /// Detail is logged, the caller only sees a generic message
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MethodNotAllowed => write!(f, "Method not allowed"),
            ApiError::Unauthorized => write!(f, "Unauthorized"),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Upstream { status, .. } => write!(f, "Upstream error: {}", status),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    error: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(ErrorResponse { error: "Method not allowed" }),
            )
                .into_response(),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse { error: "Unauthorized" }),
            )
                .into_response(),
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: &msg })).into_response()
            }
            ApiError::Upstream { status, data } => {
                let body = json!({
                    "error": UPSTREAM_ERROR_MESSAGE,
                    "status": status.as_u16(),
                    "data": data,
                });
                (status, Json(body)).into_response()
            }
            ApiError::Internal(detail) => {
                error!(error = %detail, "Address check failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse { error: INTERNAL_ERROR_MESSAGE }),
                )
                    .into_response()
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(format!("JSON error: {}", err))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
