//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! dispatcher. All types derive Serde traits for deserialization from
//! config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the admin dispatcher.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address, request timeout).
    pub listener: ListenerConfig,

    /// Application identity and inference settings.
    pub app: AppSettings,

    /// Session cookie settings.
    pub session: SessionConfig,

    /// Rate limiting configuration.
    pub rate_limit: RateLimitConfig,

    /// Security header settings.
    pub security: SecurityConfig,

    /// Heartbeat task settings.
    pub heartbeat: HeartbeatConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Request timeout (total time for request/response) in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Application identity settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppSettings {
    /// Application name shown in the layout chrome.
    pub name: String,

    /// Model name passed to the inference service.
    pub inference_model: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "Stadli Admin".to_string(),
            inference_model: "@cf/meta/llama-3.1-8b-instruct".to_string(),
        }
    }
}

/// Session cookie settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name of the session cookie.
    pub cookie_name: String,

    /// Cookie lifetime in days.
    pub ttl_days: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "stadli_session".to_string(),
            ttl_days: 30,
        }
    }
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Enable rate limiting.
    pub enabled: bool,

    /// Maximum requests per caller within one window.
    pub limit: u32,

    /// Counter window (TTL) in seconds.
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            limit: 100,
            window_secs: 60,
        }
    }
}

/// Security header settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Switch the content-security-policy to report-only mode.
    ///
    /// Currently inert: one fixed policy is emitted under both settings.
    /// The flag is kept as config surface until product intent is settled.
    pub csp_report_only: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            csp_report_only: false,
        }
    }
}

/// Heartbeat task settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HeartbeatConfig {
    /// Enable the periodic heartbeat write.
    pub enabled: bool,

    /// Interval between heartbeat writes in seconds.
    pub interval_secs: u64,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 60,
        }
    }
}
