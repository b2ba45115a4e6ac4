//! Route table and request handlers.
//!
//! # Design Decisions
//! - Registration order encodes match priority and is load-bearing: the
//!   narrow page routes come first, the API routes after, and the
//!   asset-serving fallback terminates every lookup
//! - `/api/upload` carries no method constraint so a wrong-method call
//!   reaches the handler and gets an explicit 405
//! - The fallback first delegates to the static-asset fetcher, then 404s

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::Response;
use chrono::Utc;
use serde_json::json;

use crate::http::response;
use crate::http::RequestContext;
use crate::routing::{PathPattern, PatternError, Route, Router};

pub type HandlerFuture = Pin<Box<dyn Future<Output = Response> + Send>>;
pub type Handler = Arc<dyn Fn(RequestContext) -> HandlerFuture + Send + Sync>;

fn wrap<F, Fut>(f: F) -> Handler
where
    F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    Arc::new(move |ctx| Box::pin(f(ctx)))
}

fn route(
    template: &str,
    method: Option<Method>,
    handler: Handler,
) -> Result<Route<Handler>, PatternError> {
    Ok(Route::new(PathPattern::compile(template)?, method, handler))
}

/// Admin section screens served by the generic stub page.
const SECTION_SCREENS: &[&str] = &[
    "/web",
    "/crm",
    "/campaigns",
    "/analytics",
    "/commerce",
    "/settings",
    "/crm/fans",
    "/crm/fans/:id",
    "/crm/segments",
    "/crm/segments/new",
    "/campaigns/list",
    "/campaigns/new",
    "/campaigns/playbooks",
    "/analytics/narratives",
    "/analytics/overview",
    "/analytics/attribution",
    "/web/pages",
    "/web/blocks",
    "/web/offers-surfaces",
    "/commerce/catalog/tickets",
    "/commerce/catalog/products",
    "/commerce/catalog/offers",
    "/commerce/orders",
    "/commerce/checkout",
    "/settings/users",
    "/settings/integrations",
];

/// Build the complete route table. Registration order is the match order.
pub fn build_router() -> Result<Router<Handler>, PatternError> {
    let mut routes = Vec::new();

    routes.push(route("/_health", Some(Method::GET), wrap(health))?);
    routes.push(route("/", Some(Method::GET), wrap(root_redirect))?);
    routes.push(route("/home", Some(Method::GET), wrap(home))?);

    for screen in SECTION_SCREENS {
        let template = (*screen).to_string();
        routes.push(route(
            screen,
            Some(Method::GET),
            wrap(move |ctx| stub_page(ctx, template.clone())),
        )?);
    }

    routes.push(route("/api/upload", None, wrap(upload))?);
    routes.push(route("/api/ai/echo", Some(Method::GET), wrap(ai_echo))?);

    Ok(Router::new(routes, wrap(fallback)))
}

/// Liveness page. Each store probe is caught locally and downgraded to a
/// status string; this page itself never fails on a store outage.
async fn health(ctx: RequestContext) -> Response {
    let db = match ctx.state.stores.db.ping().await {
        Ok(()) => "ok",
        Err(_) => "err",
    };
    let stamp = Utc::now().timestamp_millis().to_string();
    let kv = match ctx
        .state
        .stores
        .sessions
        .put("healthcheck", &stamp, Some(60))
        .await
    {
        Ok(()) => "ok",
        Err(_) => "err",
    };
    let blob = match ctx.state.stores.blobs.head("nonexistent").await {
        Ok(_) => "ok",
        Err(_) => "err",
    };

    ctx.view(
        "pages/health.html",
        json!({
            "active": "home",
            "title": "Health",
            "now": Utc::now().to_rfc3339(),
            "db": db,
            "kv": kv,
            "blob": blob,
        }),
    )
}

async fn root_redirect(_ctx: RequestContext) -> Response {
    response::redirect("/home")
}

async fn home(ctx: RequestContext) -> Response {
    ctx.view("pages/home.html", json!({ "active": "home", "title": "Home" }))
}

/// Generic admin section screen.
async fn stub_page(ctx: RequestContext, template: String) -> Response {
    let active = template
        .split('/')
        .nth(1)
        .filter(|s| !s.is_empty())
        .unwrap_or("home")
        .to_string();
    let title = {
        let joined = template
            .split('/')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" \u{2022} ");
        if joined.is_empty() {
            "Page".to_string()
        } else {
            joined
        }
    };

    ctx.view(
        "pages/stub.html",
        json!({ "active": active, "title": title, "path": template }),
    )
}

/// PUT /api/upload?key=... — store the request body in the blob store.
async fn upload(mut ctx: RequestContext) -> Response {
    if ctx.method != Method::PUT {
        return response::status(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
    }
    let Some(key) = ctx
        .query("key")
        .filter(|k| !k.is_empty())
        .map(str::to_string)
    else {
        return response::status(StatusCode::BAD_REQUEST, "Missing ?key");
    };
    let body = match ctx.body_bytes().await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(error = %e, "upload body could not be read");
            return response::status(StatusCode::BAD_REQUEST, "Unreadable body");
        }
    };

    match ctx.state.stores.blobs.put(&key, body.to_vec()).await {
        Ok(()) => response::json(&json!({ "ok": true, "key": key })),
        Err(e) => {
            tracing::error!(key = %key, error = %e, "blob store put failed");
            response::json_with_status(
                StatusCode::INTERNAL_SERVER_ERROR,
                &json!({ "ok": false, "error": "blob store unavailable" }),
            )
        }
    }
}

/// GET /api/ai/echo?q=... — run the configured model against the query.
async fn ai_echo(ctx: RequestContext) -> Response {
    let q = ctx.query("q").unwrap_or("hello").to_string();
    let payload = json!({ "messages": [{ "role": "user", "content": q }] });

    let model = ctx.state.config.app.inference_model.clone();
    match ctx.state.stores.inference.run(&model, payload).await {
        Ok(result) => response::json(&json!({ "ok": true, "q": q, "result": result })),
        Err(e) => {
            tracing::error!(model = %model, error = %e, "inference call failed");
            response::json_with_status(
                StatusCode::INTERNAL_SERVER_ERROR,
                &json!({ "ok": false, "error": "inference unavailable" }),
            )
        }
    }
}

/// Terminal fallback: delegate to the static-asset fetcher, then 404.
async fn fallback(ctx: RequestContext) -> Response {
    match ctx.state.stores.assets.fetch(&ctx.path).await {
        Ok(Some(asset)) => {
            let mut response = Response::new(asset.body.into());
            if let Ok(value) = HeaderValue::from_str(&asset.content_type) {
                response.headers_mut().insert(CONTENT_TYPE, value);
            }
            response
        }
        Ok(None) => response::status(StatusCode::NOT_FOUND, "Not Found"),
        Err(e) => {
            tracing::debug!(path = %ctx.path, error = %e, "asset fetch failed");
            response::status(StatusCode::NOT_FOUND, "Not Found")
        }
    }
}
