//! Security header composition for HTML responses.
//!
//! # Responsibilities
//! - Supply the fixed header set attached to every HTML response
//!
//! # Design Decisions
//! - Deterministic: same headers for every HTML response
//! - The `csp_report_only` flag is currently inert; one fixed policy is
//!   emitted under both settings

use axum::http::header::{CONTENT_TYPE, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS};
use axum::http::{HeaderMap, HeaderName, HeaderValue};

use crate::config::SecurityConfig;

/// Scripts/styles may load from self and one trusted CDN; images and fonts
/// allow data URIs; connect and form targets are restricted to self.
pub const CONTENT_SECURITY_POLICY: &str = "default-src 'self' cdn.jsdelivr.net; \
script-src 'self' 'unsafe-inline' cdn.jsdelivr.net; \
style-src 'self' 'unsafe-inline' cdn.jsdelivr.net; \
img-src 'self' data:; font-src 'self' data:; \
connect-src 'self'; form-action 'self'; upgrade-insecure-requests";

const PERMISSIONS_POLICY: &str = "geolocation=(), camera=(), microphone=()";

/// Build the header set for an HTML response.
pub fn html_headers(security: &SecurityConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    // Inert toggle: the emitted policy is identical in both modes.
    let _ = security.csp_report_only;
    headers.insert(
        HeaderName::from_static("content-security-policy"),
        HeaderValue::from_static(CONTENT_SECURITY_POLICY),
    );
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(REFERRER_POLICY, HeaderValue::from_static("no-referrer"));
    headers.insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static(PERMISSIONS_POLICY),
    );
    headers
}
