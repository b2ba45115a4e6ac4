//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes in registration order
//! - Normalize the request path (strip one trailing slash, keep `/` intact)
//! - Return the first structurally matching, method-compatible route
//! - Fall back to the mandatory catch-all when nothing matches
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) ordered scan; registration order is load-bearing, so a broad
//!   pattern registered early shadows narrower ones registered later
//! - Deliberately first-match, not most-specific-match
//! - Resolution is total: the fallback makes "no route" unrepresentable

use std::collections::HashMap;

use axum::http::Method;

use crate::routing::pattern::PathPattern;

/// A single route: compiled path template, optional method constraint,
/// and the handler payload.
#[derive(Debug, Clone)]
pub struct Route<H> {
    pattern: PathPattern,
    method: Option<Method>,
    handler: H,
}

impl<H> Route<H> {
    pub fn new(pattern: PathPattern, method: Option<Method>, handler: H) -> Self {
        Self {
            pattern,
            method,
            handler,
        }
    }
}

/// Result of resolving a request against the route table.
#[derive(Debug)]
pub struct Matched<'a, H> {
    /// Handler of the winning route, or the fallback.
    pub handler: &'a H,
    /// Decoded path captures; empty for the fallback.
    pub params: HashMap<String, String>,
    /// Template of the winning route; `None` when the fallback was used.
    pub template: Option<&'a str>,
}

/// Ordered route table with a mandatory fallback.
#[derive(Debug)]
pub struct Router<H> {
    routes: Vec<Route<H>>,
    fallback: H,
}

impl<H> Router<H> {
    pub fn new(routes: Vec<Route<H>>, fallback: H) -> Self {
        Self { routes, fallback }
    }

    /// Resolve a request to a handler. Never fails: unmatched requests
    /// resolve to the fallback.
    pub fn resolve(&self, method: &Method, path: &str) -> Matched<'_, H> {
        let path = normalize_path(path);
        for route in &self.routes {
            if let Some(constraint) = &route.method {
                if constraint != method {
                    continue;
                }
            }
            if let Some(params) = route.pattern.captures(path) {
                return Matched {
                    handler: &route.handler,
                    params,
                    template: Some(route.pattern.template()),
                };
            }
        }
        Matched {
            handler: &self.fallback,
            params: HashMap::new(),
            template: None,
        }
    }
}

/// Strip a single trailing slash unless the path is exactly the root.
fn normalize_path(path: &str) -> &str {
    if path.len() > 1 && path.ends_with('/') {
        &path[..path.len() - 1]
    } else {
        path
    }
}
