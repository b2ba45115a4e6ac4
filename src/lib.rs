//! Stadli Admin edge dispatcher library.

pub mod config;
pub mod handlers;
pub mod heartbeat;
pub mod http;
pub mod middleware;
pub mod render;
pub mod routing;
pub mod schema;
pub mod stores;

pub use config::AppConfig;
pub use http::{AppState, HttpServer, Stores};
