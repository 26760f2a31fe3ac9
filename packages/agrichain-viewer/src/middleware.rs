//! Request correlation middleware.
//!
//! Every request runs inside a `request` span carrying its correlation id,
//! so lookups, contract calls and their failures log under the same
//! `req_id` without handlers threading it through.

use axum::extract::Request;
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use rand::Rng;
use tracing::{info_span, Instrument};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Caller-supplied id, or a fresh `agc-<16 hex>` one.
fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("agc-{:016x}", rand::thread_rng().gen::<u64>()))
}

/// Open the request span and echo the id back in `x-request-id`.
pub async fn request_context(request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(request.headers());
    let span = info_span!(
        "request",
        req_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );

    let mut response = next.run(request).instrument(span).await;

    if let Ok(val) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, val);
    }
    response
}
