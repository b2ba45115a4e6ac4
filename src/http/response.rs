//! Response construction helpers.
//!
//! # Responsibilities
//! - Build HTML responses carrying the full security header set
//! - Build machine responses in the `{ ok: boolean, ... }` JSON shape
//! - Plain-text status replies and the 302 redirect

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, LOCATION};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use crate::config::SecurityConfig;
use crate::middleware::security_headers;

/// An HTML page response with the fixed security header set.
pub fn html(markup: String, security: &SecurityConfig) -> Response {
    let mut response = Response::new(Body::from(markup));
    *response.headers_mut() = security_headers::html_headers(security);
    response
}

/// A 200 JSON response.
pub fn json(value: &Value) -> Response {
    json_with_status(StatusCode::OK, value)
}

/// A JSON response with an explicit status.
pub fn json_with_status(status: StatusCode, value: &Value) -> Response {
    (
        status,
        [(CONTENT_TYPE, "application/json")],
        value.to_string(),
    )
        .into_response()
}

/// A plain-text status reply.
pub fn status(code: StatusCode, body: &'static str) -> Response {
    (code, body).into_response()
}

/// A 302 redirect.
pub fn redirect(location: &'static str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location)]).into_response()
}
