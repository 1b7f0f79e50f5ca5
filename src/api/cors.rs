// CORS headers for the address check endpoint, attached to every response.
// Unlisted origins receive the first allow-listed origin, not a missing header.

use axum::{
    extract::{Request, State},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN,
        },
        HeaderMap, HeaderValue,
    },
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::warn;

pub const ALLOW_HEADERS: &str = "Content-Type, X-Client-Token";
pub const ALLOW_METHODS: &str = "POST, OPTIONS";

#[derive(Debug, Clone, Default)]
pub struct CorsPolicy {
    allowed_origins: Vec<String>,
}

impl CorsPolicy {
    pub fn new(allowed_origins: Vec<String>) -> Self {
        Self { allowed_origins }
    }

    /// Origin to advertise for a request
    ///
    /// Without an allow-list any origin is accepted. With one, a listed
    /// origin is echoed back and anything else gets the first listed origin.
    pub fn allow_origin<'a>(&'a self, request_origin: Option<&'a str>) -> &'a str {
        let Some(first) = self.allowed_origins.first() else {
            return "*";
        };

        match request_origin {
            Some(origin) if self.allowed_origins.iter().any(|o| o == origin) => origin,
            _ => first,
        }
    }

    /// Set the CORS headers for a request with the given `Origin`
    pub fn apply(&self, request_origin: Option<&str>, headers: &mut HeaderMap) {
        let origin = self.allow_origin(request_origin);

        match HeaderValue::from_str(origin) {
            Ok(value) => {
                headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, value);
            }
            Err(_) => warn!(origin, "Skipping CORS origin that is not a valid header value"),
        }
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
    }
}

/// Middleware attaching CORS headers to every response, errors included
pub async fn apply_cors(
    State(policy): State<Arc<CorsPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    // Resolved before the handler consumes the request
    let request_origin = request
        .headers()
        .get(ORIGIN)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    let mut response = next.run(request).await;
    policy.apply(request_origin.as_deref(), response.headers_mut());
    response
}
