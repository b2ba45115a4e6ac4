//! Per-request context.
//!
//! # Responsibilities
//! - Bundle parsed captures, query params, headers, body and session id
//!   together with the shared application state
//! - Render pages as a fixed two-pass composition: content template first,
//!   then the layout with the rendered inner HTML bound as `content`

use std::collections::HashMap;

use axum::body::{to_bytes, Body, Bytes};
use axum::http::request::Parts;
use axum::http::{HeaderMap, Method};
use axum::response::Response;
use serde_json::{json, Value};

use crate::http::response;
use crate::http::server::AppState;
use crate::schema;

/// Largest request body the dispatcher will buffer (uploads).
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Everything a handler needs for one request.
pub struct RequestContext {
    pub state: AppState,
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    /// Decoded path captures from the matched route.
    pub params: HashMap<String, String>,
    /// Session identifier, existing or freshly issued for this request.
    pub session_id: String,
    query: HashMap<String, String>,
    body: Option<Body>,
}

impl RequestContext {
    pub fn new(
        state: AppState,
        parts: Parts,
        body: Body,
        params: HashMap<String, String>,
        session_id: String,
    ) -> Self {
        let query = parse_query(parts.uri.query().unwrap_or(""));
        Self {
            state,
            method: parts.method,
            path: parts.uri.path().to_string(),
            headers: parts.headers,
            params,
            session_id,
            query,
            body: Some(body),
        }
    }

    /// A decoded query parameter.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Buffer the request body. Consumes it; a second call yields empty.
    pub async fn body_bytes(&mut self) -> Result<Bytes, axum::Error> {
        match self.body.take() {
            Some(body) => to_bytes(body, MAX_BODY_BYTES).await,
            None => Ok(Bytes::new()),
        }
    }

    /// Render a page with the base layout and navigation.
    ///
    /// Pass one: the content template against `data` plus the product
    /// schema. Pass two: the layout against the shared chrome (title, nav,
    /// active marker, app name) with the inner HTML bound as `content`.
    /// Exactly this one nesting depth; nothing recursive.
    pub fn view(&self, page: &str, data: Value) -> Response {
        let app_name = self.state.config.app.name.clone();
        let title = data
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or(&app_name)
            .to_string();
        let active = data
            .get("active")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let mut page_data = match data {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        page_data.insert("schema".to_string(), (*self.state.schema).clone());
        page_data.insert("app_name".to_string(), Value::String(app_name.clone()));
        if !page_data.contains_key("active") {
            page_data.insert("active".to_string(), Value::String(active.clone()));
        }
        let content = self
            .state
            .templates
            .render(page, &Value::Object(page_data));

        let chrome = json!({
            "title": title,
            "nav": schema::sidebar(&self.state.schema),
            "active": active,
            "app_name": app_name,
            "content": content,
        });
        let markup = self.state.templates.render("layouts/base.html", &chrome);

        response::html(markup, &self.state.config.security)
    }
}

fn parse_query(raw: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for pair in raw.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = urlencoding::decode(key)
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| key.to_string());
        let value = urlencoding::decode(value)
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| value.to_string());
        params.insert(key, value);
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_decodes_pairs() {
        let params = parse_query("key=a%20b&q=hello");
        assert_eq!(params.get("key").map(String::as_str), Some("a b"));
        assert_eq!(params.get("q").map(String::as_str), Some("hello"));
    }

    #[test]
    fn test_parse_query_handles_bare_keys() {
        let params = parse_query("flag&x=1");
        assert_eq!(params.get("flag").map(String::as_str), Some(""));
        assert_eq!(params.get("x").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_parse_query_empty() {
        assert!(parse_query("").is_empty());
    }
}
