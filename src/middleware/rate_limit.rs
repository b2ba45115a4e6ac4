//! Rate limiting over the key/value store.
//!
//! # Responsibilities
//! - Maintain a TTL-bounded request counter per caller identity
//! - Reject callers whose incremented count exceeds the threshold
//!
//! # Design Decisions
//! - Fixed window: each put refreshes the counter with the window TTL
//! - No atomicity across read-increment-write; minor miscounting under
//!   concurrent bursts from one caller is acceptable for this limiter
//! - Store failures fail open: the request proceeds and a warning is logged

use std::sync::Arc;

use crate::config::RateLimitConfig;
use crate::stores::KeyValueStore;

/// Outcome of a rate check.
#[derive(Debug, PartialEq, Eq)]
pub enum RateDecision {
    Allow,
    Reject,
}

/// KV-backed fixed-window rate limiter.
pub struct RateLimiter {
    kv: Arc<dyn KeyValueStore>,
    enabled: bool,
    limit: u32,
    window_secs: u64,
}

impl RateLimiter {
    pub fn new(kv: Arc<dyn KeyValueStore>, config: &RateLimitConfig) -> Self {
        Self {
            kv,
            enabled: config.enabled,
            limit: config.limit,
            window_secs: config.window_secs,
        }
    }

    /// Increment the caller's counter and decide whether to admit the
    /// request. Counter-store failures admit the request.
    pub async fn check(&self, caller: &str) -> RateDecision {
        if !self.enabled {
            return RateDecision::Allow;
        }

        let key = format!("rl:{}", caller);
        let current = match self.kv.get(&key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(caller = %caller, error = %e, "rate counter read failed, failing open");
                return RateDecision::Allow;
            }
        };

        let count = current
            .as_deref()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(0)
            .saturating_add(1);

        if let Err(e) = self
            .kv
            .put(&key, &count.to_string(), Some(self.window_secs))
            .await
        {
            tracing::warn!(caller = %caller, error = %e, "rate counter write failed, failing open");
            return RateDecision::Allow;
        }

        if count > self.limit {
            RateDecision::Reject
        } else {
            RateDecision::Allow
        }
    }
}
