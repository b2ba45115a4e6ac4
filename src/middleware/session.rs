//! Session resolution and cookie issuance.
//!
//! # Responsibilities
//! - Reuse the session id carried by the configured cookie
//! - Mint a cryptographically random id when the cookie is absent
//! - Produce the pending set-cookie header for new sessions
//!
//! # Design Decisions
//! - Lifecycle is owned by the cookie plus the external session store;
//!   nothing is tracked in-process beyond the current request
//! - The set-cookie header is carried out-of-band and merged into the
//!   handler's response, since handlers are unaware of session issuance
//! - Attributes are fixed: Path=/, HttpOnly, Secure, SameSite=Lax,
//!   Expires at the configured lifetime

use axum::http::{HeaderMap, HeaderValue};
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::middleware::cookie_value;

/// Result of resolving the session for one request.
#[derive(Debug)]
pub struct SessionOutcome {
    /// Session identifier, existing or freshly minted.
    pub id: String,
    /// Pending set-cookie header; present only for fresh sessions.
    pub set_cookie: Option<HeaderValue>,
}

/// Resolves session identity from the request cookie.
pub struct SessionManager {
    cookie_name: String,
    ttl_days: i64,
}

impl SessionManager {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            cookie_name: config.cookie_name.clone(),
            ttl_days: i64::from(config.ttl_days),
        }
    }

    /// Resolve the session for a request: reuse the cookie id if present,
    /// otherwise mint a new one with a pending set-cookie header.
    pub fn resolve(&self, headers: &HeaderMap) -> SessionOutcome {
        if let Some(id) = cookie_value(headers, &self.cookie_name) {
            return SessionOutcome {
                id,
                set_cookie: None,
            };
        }

        let id = Uuid::new_v4().to_string();
        let expires = (Utc::now() + Duration::days(self.ttl_days))
            .format("%a, %d %b %Y %H:%M:%S GMT");
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; Secure; SameSite=Lax; Expires={}",
            self.cookie_name, id, expires
        );

        SessionOutcome {
            id,
            // The cookie text is ASCII by construction; a failure here
            // would mean a malformed cookie name, rejected at config time.
            set_cookie: HeaderValue::from_str(&cookie).ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;

    fn manager() -> SessionManager {
        SessionManager::new(&SessionConfig::default())
    }

    #[test]
    fn test_missing_cookie_mints_session_with_pending_header() {
        let outcome = manager().resolve(&HeaderMap::new());
        assert!(!outcome.id.is_empty());

        let cookie = outcome.set_cookie.expect("fresh session must pend a cookie");
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with(&format!("stadli_session={}", outcome.id)));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Expires="));
    }

    #[test]
    fn test_existing_cookie_is_reused_without_reissue() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("stadli_session=abc"));

        let outcome = manager().resolve(&headers);
        assert_eq!(outcome.id, "abc");
        assert!(outcome.set_cookie.is_none());
    }

    #[test]
    fn test_fresh_ids_are_unique() {
        let m = manager();
        let a = m.resolve(&HeaderMap::new());
        let b = m.resolve(&HeaderMap::new());
        assert_ne!(a.id, b.id);
    }
}
