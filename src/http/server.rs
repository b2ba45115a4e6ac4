//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the axum router: a catch-all feeding every request into the
//!   dispatcher
//! - Wire up middleware layers (tracing, request timeout)
//! - Run the per-request pipeline: rate check → route match → session
//!   resolve → handler execution → pending-header merge
//! - Bind the server to a listener with graceful shutdown
//!
//! # Design Decisions
//! - The route table, template cache and product schema are built once at
//!   startup and shared via Arc; no ambient singletons, no locks
//! - Session issuance is merged into the response here, after the handler,
//!   because handlers never see it
//! - Rejection at the rate check short-circuits straight to the response

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::header::SET_COOKIE;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::routing::any;
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::handlers::Handler;
use crate::http::context::RequestContext;
use crate::http::response;
use crate::middleware::{RateDecision, RateLimiter, SessionManager};
use crate::render::TemplateCache;
use crate::routing::Router;
use crate::stores::memory::{
    EchoInference, EmbeddedAssets, MemoryBlobStore, MemoryKv, MemoryRelationalStore,
};
use crate::stores::{AssetFetcher, BlobStore, InferenceService, KeyValueStore, RelationalStore};

/// Bound external store capabilities.
#[derive(Clone)]
pub struct Stores {
    pub db: Arc<dyn RelationalStore>,
    /// Session/rate-counter store.
    pub sessions: Arc<dyn KeyValueStore>,
    /// Config store (heartbeat target).
    pub config_kv: Arc<dyn KeyValueStore>,
    pub blobs: Arc<dyn BlobStore>,
    pub inference: Arc<dyn InferenceService>,
    pub assets: Arc<dyn AssetFetcher>,
}

impl Stores {
    /// In-memory bindings for local runs and tests.
    pub fn in_memory() -> Self {
        Self {
            db: Arc::new(MemoryRelationalStore),
            sessions: Arc::new(MemoryKv::new()),
            config_kv: Arc::new(MemoryKv::new()),
            blobs: Arc::new(MemoryBlobStore::new()),
            inference: Arc::new(EchoInference),
            assets: Arc::new(EmbeddedAssets::builtin()),
        }
    }
}

/// Application state injected into the dispatcher.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub router: Arc<Router<Handler>>,
    pub templates: Arc<TemplateCache>,
    pub schema: Arc<Value>,
    pub stores: Stores,
}

/// Build the axum app: two catch-all routes into the dispatcher plus the
/// middleware layers.
pub fn build_app(state: AppState) -> axum::Router {
    let timeout = Duration::from_secs(state.config.listener.request_timeout_secs);
    axum::Router::new()
        .route("/{*path}", any(dispatch))
        .route("/", any(dispatch))
        .with_state(state)
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
}

/// HTTP server for the admin dispatcher.
pub struct HttpServer {
    app: axum::Router,
}

impl HttpServer {
    pub fn new(state: AppState) -> Self {
        Self {
            app: build_app(state),
        }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .app
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Per-request pipeline around the route table.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let caller = caller_identity(&request);

    let limiter = RateLimiter::new(state.stores.sessions.clone(), &state.config.rate_limit);
    if limiter.check(&caller).await == RateDecision::Reject {
        tracing::warn!(caller = %caller, "rate limit exceeded");
        return response::status(StatusCode::TOO_MANY_REQUESTS, "Too Many Requests");
    }

    let (parts, body) = request.into_parts();

    let (handler, params, template) = {
        let matched = state.router.resolve(&parts.method, parts.uri.path());
        (
            matched.handler.clone(),
            matched.params,
            matched.template.map(str::to_string),
        )
    };
    tracing::debug!(
        method = %parts.method,
        path = %parts.uri.path(),
        route = %template.as_deref().unwrap_or("(fallback)"),
        "dispatching request"
    );

    let session = SessionManager::new(&state.config.session).resolve(&parts.headers);
    let pending_cookie = session.set_cookie;

    let ctx = RequestContext::new(state, parts, body, params, session.id);
    let mut response = handler(ctx).await;

    // Merge the out-of-band session issuance into whatever the handler
    // produced; handlers are unaware of it.
    if let Some(cookie) = pending_cookie {
        response.headers_mut().append(SET_COOKIE, cookie);
    }

    response
}

/// Caller identity for rate limiting: first x-forwarded-for hop when
/// present, else the peer address, else "unknown".
fn caller_identity(request: &Request<Body>) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return format!("ip:{}", forwarded);
    }
    match request.extensions().get::<ConnectInfo<SocketAddr>>() {
        Some(ConnectInfo(addr)) => format!("ip:{}", addr.ip()),
        None => "unknown".to_string(),
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
