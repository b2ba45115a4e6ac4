//! External store capabilities.
//!
//! # Data Flow
//! ```text
//! handler / middleware
//!     → capability trait (async, object-safe)
//!     → backing store (network in production, in-memory for local runs)
//! ```
//!
//! # Design Decisions
//! - The dispatcher owns no persistent state; every store sits behind an
//!   async trait and every call is a suspension point
//! - Calls are attempted exactly once; retry policy belongs to callers
//!   (rate limiting fails open, health probes degrade to status strings)
//! - In-memory implementations back local runs and the test suite

pub mod memory;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Error surfaced by any store capability.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Relational store: only a trivial liveness query is required here.
#[async_trait]
pub trait RelationalStore: Send + Sync {
    /// Execute a trivial query and report success or failure.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Key/value store with TTL support (sessions, rate counters, config).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store a value; `ttl_secs` of `None` means no expiry.
    async fn put(&self, key: &str, value: &str, ttl_secs: Option<u64>) -> Result<(), StoreError>;
}

/// Blob store for uploaded assets.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Whether an object exists under `key`.
    async fn head(&self, key: &str) -> Result<bool, StoreError>;

    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError>;
}

/// Generative inference service.
#[async_trait]
pub trait InferenceService: Send + Sync {
    /// Run `model` against a message payload; the result is opaque JSON.
    async fn run(&self, model: &str, payload: Value) -> Result<Value, StoreError>;
}

/// A static asset resolved by path.
#[derive(Debug, Clone)]
pub struct Asset {
    pub content_type: String,
    pub body: Vec<u8>,
}

/// Static-asset fetcher; `None` means the asset does not exist.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<Option<Asset>, StoreError>;
}
