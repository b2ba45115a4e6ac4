//! Periodic heartbeat.
//!
//! # Responsibilities
//! - Write the current timestamp to the config store on a fixed interval
//!
//! # Design Decisions
//! - Best effort: a failed write is logged and the next tick tries again
//!   (each write is still attempted exactly once)

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::broadcast;
use tokio::time;

use crate::config::HeartbeatConfig;
use crate::stores::KeyValueStore;

const HEARTBEAT_KEY: &str = "last_cron";

pub struct Heartbeat {
    kv: Arc<dyn KeyValueStore>,
    config: HeartbeatConfig,
}

impl Heartbeat {
    pub fn new(kv: Arc<dyn KeyValueStore>, config: HeartbeatConfig) -> Self {
        Self { kv, config }
    }

    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        if !self.config.enabled {
            tracing::info!("Heartbeat disabled");
            return;
        }

        tracing::info!(interval = self.config.interval_secs, "Heartbeat starting");

        let mut ticker = time::interval(Duration::from_secs(self.config.interval_secs));
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.beat().await;
                }
                _ = shutdown.recv() => {
                    tracing::info!("Heartbeat received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// Write one heartbeat timestamp.
    pub async fn beat(&self) {
        let now = Utc::now().to_rfc3339();
        match self.kv.put(HEARTBEAT_KEY, &now, None).await {
            Ok(()) => tracing::debug!(at = %now, "heartbeat written"),
            Err(e) => tracing::warn!(error = %e, "heartbeat write failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::memory::MemoryKv;

    #[tokio::test]
    async fn test_beat_writes_timestamp() {
        let kv = Arc::new(MemoryKv::new());
        let heartbeat = Heartbeat::new(kv.clone(), HeartbeatConfig::default());
        heartbeat.beat().await;

        let value = kv.get(HEARTBEAT_KEY).await.unwrap();
        assert!(value.is_some());
    }
}
