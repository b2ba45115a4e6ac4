//! Stadli Admin edge dispatcher (v1)
//!
//! An edge-style HTTP dispatcher for the admin dashboard, built with Tokio
//! and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────┐
//!                     │                 ADMIN DISPATCHER                 │
//!                     │                                                  │
//!   Client Request    │  ┌─────────┐   ┌───────────┐   ┌─────────────┐  │
//!   ──────────────────┼─▶│  http   │──▶│middleware │──▶│   routing   │  │
//!                     │  │ server  │   │rate/sessn │   │   engine    │  │
//!                     │  └─────────┘   └───────────┘   └──────┬──────┘  │
//!                     │                                       │         │
//!                     │                                       ▼         │
//!                     │  ┌─────────┐   ┌───────────┐   ┌─────────────┐  │
//!   Client Response   │  │ header  │◀──│  render   │◀──│  handlers   │  │
//!   ◀─────────────────┼──│  merge  │   │ (2-pass)  │   │             │  │
//!                     │  └─────────┘   └───────────┘   └──────┬──────┘  │
//!                     │                                       │         │
//!                     │                 ┌─────────────────────▼───────┐ │
//!                     │                 │   stores (capability traits)│ │
//!                     │                 │  sql / kv / blob / ai / ... │ │
//!                     │                 └─────────────────────────────┘ │
//!                     └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stadli_admin::config::{load_config, AppConfig};
use stadli_admin::heartbeat::Heartbeat;
use stadli_admin::http::{AppState, HttpServer, Stores};
use stadli_admin::render::TemplateCache;
use stadli_admin::{handlers, schema};

#[derive(Parser, Debug)]
#[command(name = "stadli-admin", about = "Admin dashboard edge dispatcher")]
struct Args {
    /// Path to a TOML configuration file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stadli_admin=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("stadli-admin v0.1.0 starting");

    let args = Args::parse();
    let config = match args.config {
        Some(path) => load_config(&path)?,
        None => AppConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        rate_limit = config.rate_limit.limit,
        cookie = %config.session.cookie_name,
        "Configuration loaded"
    );

    // Immutable tables, built once and shared across all requests.
    let router = Arc::new(handlers::build_router()?);
    let templates = Arc::new(TemplateCache::builtin()?);
    let schema = Arc::new(schema::product_schema()?);
    let stores = Stores::in_memory();

    let state = AppState {
        config: Arc::new(config),
        router,
        templates,
        schema,
        stores: stores.clone(),
    };

    // Spawn the heartbeat task
    let (shutdown_tx, _) = broadcast::channel(1);
    let heartbeat = Heartbeat::new(stores.config_kv.clone(), state.config.heartbeat.clone());
    tokio::spawn({
        let shutdown = shutdown_tx.subscribe();
        async move {
            heartbeat.run(shutdown).await;
        }
    });

    let listener = TcpListener::bind(&state.config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let server = HttpServer::new(state);
    server.run(listener).await?;

    let _ = shutdown_tx.send(());
    tracing::info!("Shutdown complete");
    Ok(())
}
