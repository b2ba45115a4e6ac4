//! CSRF token scaffold.
//!
//! Token generation only; no route validates tokens yet.
//! TODO: wire validation into the form-handling routes once any of the
//! stub pages accepts a POST.

use axum::http::HeaderMap;

use crate::middleware::cookie_value;

/// Generate an opaque CSRF token: 32 hex characters, cryptographically
/// random.
pub fn new_token() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Read a previously issued token from the `csrf` cookie.
pub fn token_from_cookie(headers: &HeaderMap) -> Option<String> {
    cookie_value(headers, "csrf")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;
    use axum::http::HeaderValue;

    #[test]
    fn test_token_shape() {
        let token = new_token();
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(new_token(), new_token());
    }

    #[test]
    fn test_token_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("csrf=deadbeef"));
        assert_eq!(token_from_cookie(&headers).as_deref(), Some("deadbeef"));
        assert_eq!(token_from_cookie(&HeaderMap::new()), None);
    }
}
