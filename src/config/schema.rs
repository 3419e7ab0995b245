//! Configuration schema definitions.
//!
//! Server settings are read from a TOML document. Every field has a default,
//! so an empty file (or no file at all) yields a runnable configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::redirect::{ConfigFormat, PathRecord};

/// Root configuration for the redirect server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Where redirect records come from.
    pub redirects: RedirectsConfig,

    /// Response for paths without a redirect.
    pub fallback: FallbackConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Redirect sources. Inline records are applied first, then the file's.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RedirectsConfig {
    /// Redirect document on disk.
    pub file: Option<PathBuf>,

    /// Document format; inferred from the file extension when unset.
    pub format: Option<ConfigFormat>,

    /// Records declared directly in the settings file.
    pub inline: Vec<PathRecord>,
}

impl RedirectsConfig {
    /// Format to decode `file` with.
    pub fn effective_format(&self) -> ConfigFormat {
        match (self.format, &self.file) {
            (Some(format), _) => format,
            (None, Some(file)) => ConfigFormat::from_path(file),
            (None, None) => ConfigFormat::default(),
        }
    }
}

/// Fallback handler settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Body of the 200 response for unmapped paths.
    pub message: String,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            message: "Hello, world!".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
