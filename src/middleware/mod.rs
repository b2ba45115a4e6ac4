//! Cross-cutting middleware around dispatch.
//!
//! # Data Flow
//! ```text
//! request received
//!     → rate_limit.rs   (KV counter; reject short-circuits to response)
//!     → [route match]
//!     → session.rs      (reuse or mint session id; pend a set-cookie)
//!     → [handler execution]
//!     → pending-header merge
//!     → response
//!
//! security_headers.rs supplies the fixed header set attached to every
//! HTML response; csrf.rs is a token-generation stub.
//! ```
//!
//! # Design Decisions
//! - The order above is fixed; stages compose side effects into one
//!   outgoing response
//! - Session issuance travels out-of-band as a pending header because
//!   handlers are unaware of it
//! - Rate-limit store failures fail open (documented policy, not an
//!   accident): this limiter is lightweight and non-authoritative

pub mod csrf;
pub mod rate_limit;
pub mod security_headers;
pub mod session;

pub use rate_limit::{RateDecision, RateLimiter};
pub use session::{SessionManager, SessionOutcome};

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

/// Extract a cookie value by name from the request headers.
pub(crate) fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;
    for pair in raw.split(';') {
        let pair = pair.trim();
        if let Some((k, v)) = pair.split_once('=') {
            if k == name {
                return Some(v.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_cookie_value_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("a=1; stadli_session=abc123; b=2"),
        );
        assert_eq!(
            cookie_value(&headers, "stadli_session").as_deref(),
            Some("abc123")
        );
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn test_cookie_name_is_not_prefix_matched() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("sid_extra=x; sid=y"));
        assert_eq!(cookie_value(&headers, "sid").as_deref(), Some("y"));
    }
}
