//! In-memory store implementations.
//!
//! Reference backends for local runs and tests. Production deployments bind
//! the same traits to the platform's managed stores.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{json, Value};

use super::{Asset, AssetFetcher, BlobStore, InferenceService, KeyValueStore, RelationalStore, StoreError};

/// Key/value store backed by a concurrent map with lazy TTL expiry.
#[derive(Default)]
pub struct MemoryKv {
    entries: DashMap<String, (String, Option<Instant>)>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if let Some(entry) = self.entries.get(key) {
            let (value, deadline) = entry.value().clone();
            drop(entry);
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    self.entries.remove(key);
                    return Ok(None);
                }
            }
            return Ok(Some(value));
        }
        Ok(None)
    }

    async fn put(&self, key: &str, value: &str, ttl_secs: Option<u64>) -> Result<(), StoreError> {
        let deadline = ttl_secs.map(|secs| Instant::now() + Duration::from_secs(secs));
        self.entries
            .insert(key.to_string(), (value.to_string(), deadline));
        Ok(())
    }
}

/// Blob store backed by a concurrent map.
#[derive(Default)]
pub struct MemoryBlobStore {
    objects: DashMap<String, Vec<u8>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn head(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.objects.contains_key(key))
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        self.objects.insert(key.to_string(), bytes);
        Ok(())
    }
}

/// Relational store stand-in whose liveness query always succeeds.
#[derive(Default)]
pub struct MemoryRelationalStore;

#[async_trait]
impl RelationalStore for MemoryRelationalStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Inference stand-in that echoes the payload back, tagged with the model.
#[derive(Default)]
pub struct EchoInference;

#[async_trait]
impl InferenceService for EchoInference {
    async fn run(&self, model: &str, payload: Value) -> Result<Value, StoreError> {
        Ok(json!({ "model": model, "echo": payload }))
    }
}

/// Static assets embedded into the binary at build time.
pub struct EmbeddedAssets {
    files: HashMap<&'static str, (&'static str, &'static [u8])>,
}

impl EmbeddedAssets {
    /// The assets shipped with the dashboard.
    pub fn builtin() -> Self {
        let mut files: HashMap<&'static str, (&'static str, &'static [u8])> = HashMap::new();
        files.insert(
            "/styles.css",
            ("text/css; charset=utf-8", include_bytes!("../../assets/styles.css")),
        );
        Self { files }
    }
}

#[async_trait]
impl AssetFetcher for EmbeddedAssets {
    async fn fetch(&self, path: &str) -> Result<Option<Asset>, StoreError> {
        Ok(self.files.get(path).map(|(content_type, body)| Asset {
            content_type: (*content_type).to_string(),
            body: body.to_vec(),
        }))
    }
}
