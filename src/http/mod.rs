//! HTTP dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, catch-all into dispatch)
//!     → middleware (rate check → route match → session resolve)
//!     → context.rs (per-request bundle, page rendering)
//!     → handler
//!     → header merge (pending set-cookie)
//!     → response.rs helpers → client
//! ```

pub mod context;
pub mod response;
pub mod server;

pub use context::RequestContext;
pub use server::{build_app, AppState, HttpServer, Stores};
