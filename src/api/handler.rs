use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::api::AppState;
use crate::auth::authorize;
use crate::domain::{extract_query, parse_body, verify_candidates};
use crate::models::VerificationResponse;

/// Address check endpoint
///
/// Gates run in order and each one can end the request early:
/// preflight, method, client token, body, required fields, upstream call,
/// verdict. CORS headers are added by the surrounding middleware.
#[tracing::instrument(skip(state, headers, body), fields(method = %method))]
pub async fn address_check_handler(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    if method == Method::OPTIONS {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    if method != Method::POST {
        return Err(ApiError::MethodNotAllowed);
    }

    authorize(state.config.client_token.as_deref(), &headers)?;

    let payload = parse_body(&body)?;
    let query = extract_query(&payload)?;

    info!(
        country_iso = %query.country_iso,
        postal_code = %query.postal_code,
        house_number = %query.house_number,
        "Processing address check"
    );

    let upstream = state.provider.lookup(&query).await?;

    if !upstream.is_success() {
        error!(
            status = upstream.status,
            data = ?upstream.body,
            "PostNL error"
        );
        let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
        return Err(ApiError::Upstream {
            status,
            data: upstream.body,
        });
    }

    let verdict = verify_candidates(upstream.body.as_ref());

    match &verdict {
        VerificationResponse::NoMatch { .. } => warn!(
            postal_code = %query.postal_code,
            house_number = %query.house_number,
            "No address match"
        ),
        VerificationResponse::Matched { valid, .. } => info!(valid, "Address check completed"),
    }

    Ok(Json(verdict).into_response())
}
