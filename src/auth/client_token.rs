use axum::http::HeaderMap;
use constant_time_eq::constant_time_eq;
use tracing::{debug, warn};

use crate::api::error::ApiError;

pub const CLIENT_TOKEN_HEADER: &str = "x-client-token";

/// Check the shared client token, if one is configured
///
/// With no expected token the endpoint runs in open mode and every caller is
/// accepted. Otherwise the `X-Client-Token` header must match exactly.
pub fn authorize(expected: Option<&str>, headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(expected) = expected else {
        debug!("No client token configured, skipping authorization");
        return Ok(());
    };

    let provided = headers
        .get(CLIENT_TOKEN_HEADER)
        .and_then(|h| h.to_str().ok());

    match provided {
        Some(token) if constant_time_eq(token.as_bytes(), expected.as_bytes()) => Ok(()),
        Some(_) => {
            warn!("Rejected request with mismatched client token");
            Err(ApiError::Unauthorized)
        }
        None => {
            warn!("Rejected request without client token");
            Err(ApiError::Unauthorized)
        }
    }
}
