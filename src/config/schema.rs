//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Wildcard entry accepted in CORS lists.
pub const WILDCARD: &str = "*";

/// Root configuration for the server.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Cross-origin policy applied to `/api/*`.
    pub cors: CorsConfig,

    /// Where table data comes from.
    pub source: SourceConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Cross-origin resource sharing policy.
///
/// A list holding the single entry `"*"` allows anything for that field.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CorsConfig {
    /// Origins allowed to read `/api/*` responses.
    pub allowed_origins: Vec<String>,

    /// Methods advertised on preflight.
    pub allowed_methods: Vec<String>,

    /// Request headers advertised on preflight.
    pub allowed_headers: Vec<String>,
}

impl CorsConfig {
    /// Development and production dashboards, GET/HEAD only.
    pub fn restricted() -> Self {
        Self {
            allowed_origins: vec![
                "http://192.168.3.31:777".to_string(),
                "http://192.168.3.31:3000".to_string(),
                "http://localhost:777".to_string(),
                "http://localhost:3000".to_string(),
            ],
            allowed_methods: default_methods(),
            allowed_headers: default_headers(),
        }
    }

    /// A single fixed origin, GET/HEAD only.
    pub fn single_origin(origin: impl Into<String>) -> Self {
        Self {
            allowed_origins: vec![origin.into()],
            allowed_methods: default_methods(),
            allowed_headers: default_headers(),
        }
    }

    /// Any origin, any method, any header.
    pub fn permissive() -> Self {
        Self {
            allowed_origins: vec![WILDCARD.to_string()],
            allowed_methods: vec![WILDCARD.to_string()],
            allowed_headers: vec![WILDCARD.to_string()],
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        is_wildcard(&self.allowed_origins)
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self::restricted()
    }
}

/// True when a CORS list is exactly `["*"]`.
pub fn is_wildcard(list: &[String]) -> bool {
    matches!(list, [only] if only == WILDCARD)
}

fn default_methods() -> Vec<String> {
    vec!["GET".to_string(), "HEAD".to_string()]
}

fn default_headers() -> Vec<String> {
    vec!["Content-Type".to_string()]
}

/// Table data source configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    /// Table name, used in logs and metric labels.
    pub table: String,

    /// JSON file holding the exported rows.
    pub data_file: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            table: "Convenio".to_string(),
            data_file: PathBuf::from("data/convenio.json"),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
