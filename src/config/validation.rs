//! Configuration validation.
//!
//! Serde handles syntax; this module checks values: addresses parse, CORS
//! entries are well formed, required strings are non-empty. All problems are
//! reported together, not just the first one.

use axum::http::{HeaderName, HeaderValue, Method};
use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::{is_wildcard, CorsConfig, ServerConfig, WILDCARD};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: list must not be empty")]
    EmptyList { field: &'static str },

    #[error("{field}: '*' cannot be combined with other entries")]
    MixedWildcard { field: &'static str },

    #[error("cors.allowed_origins: invalid origin '{0}'")]
    InvalidOrigin(String),

    #[error("cors.allowed_methods: invalid method '{0}'")]
    InvalidMethod(String),

    #[error("cors.allowed_headers: invalid header name '{0}'")]
    InvalidHeader(String),

    #[error("{field}: must not be empty")]
    Empty { field: &'static str },

    #[error("observability.log_level: unknown level '{0}'")]
    InvalidLogLevel(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    errors.extend(validate_cors(&config.cors));

    if config.source.table.trim().is_empty() {
        errors.push(ValidationError::Empty { field: "source.table" });
    }
    if config.source.data_file.as_os_str().is_empty() {
        errors.push(ValidationError::Empty { field: "source.data_file" });
    }

    let obs = &config.observability;
    if !LOG_LEVELS.contains(&obs.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::InvalidLogLevel(obs.log_level.clone()));
    }
    if obs.metrics_enabled && obs.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: obs.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a CORS policy on its own.
pub fn validate_cors(cors: &CorsConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_list_shape("cors.allowed_origins", &cors.allowed_origins, &mut errors);
    check_list_shape("cors.allowed_methods", &cors.allowed_methods, &mut errors);
    check_list_shape("cors.allowed_headers", &cors.allowed_headers, &mut errors);

    if !is_wildcard(&cors.allowed_origins) {
        for origin in cors.allowed_origins.iter().filter(|o| *o != WILDCARD) {
            let scheme_ok = origin.starts_with("http://") || origin.starts_with("https://");
            if !scheme_ok || HeaderValue::from_str(origin).is_err() || origin.ends_with('/') {
                errors.push(ValidationError::InvalidOrigin(origin.clone()));
            }
        }
    }

    if !is_wildcard(&cors.allowed_methods) {
        for method in cors.allowed_methods.iter().filter(|m| *m != WILDCARD) {
            if method.parse::<Method>().is_err() {
                errors.push(ValidationError::InvalidMethod(method.clone()));
            }
        }
    }

    if !is_wildcard(&cors.allowed_headers) {
        for header in cors.allowed_headers.iter().filter(|h| *h != WILDCARD) {
            if HeaderName::from_bytes(header.as_bytes()).is_err() {
                errors.push(ValidationError::InvalidHeader(header.clone()));
            }
        }
    }

    errors
}

fn check_list_shape(field: &'static str, list: &[String], errors: &mut Vec<ValidationError>) {
    if list.is_empty() {
        errors.push(ValidationError::EmptyList { field });
    } else if list.len() > 1 && list.iter().any(|entry| entry == WILDCARD) {
        errors.push(ValidationError::MixedWildcard { field });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn presets_are_valid() {
        assert!(validate_cors(&CorsConfig::restricted()).is_empty());
        assert!(validate_cors(&CorsConfig::permissive()).is_empty());
        assert!(validate_cors(&CorsConfig::single_origin("https://painel.example.com")).is_empty());
    }

    #[test]
    fn wildcard_mixed_with_origins_rejected() {
        let mut cors = CorsConfig::restricted();
        cors.allowed_origins.push("*".to_string());
        let errors = validate_cors(&cors);
        assert_eq!(
            errors,
            vec![ValidationError::MixedWildcard { field: "cors.allowed_origins" }]
        );
    }

    #[test]
    fn malformed_entries_rejected() {
        let cors = CorsConfig {
            allowed_origins: vec!["localhost:3000".to_string(), "http://ok.local/".to_string()],
            allowed_methods: vec!["GET".to_string(), "BAD METHOD".to_string()],
            allowed_headers: vec!["Content Type".to_string()],
        };
        let errors = validate_cors(&cors);
        assert!(errors.contains(&ValidationError::InvalidOrigin("localhost:3000".to_string())));
        assert!(errors.contains(&ValidationError::InvalidOrigin("http://ok.local/".to_string())));
        assert!(errors.contains(&ValidationError::InvalidMethod("BAD METHOD".to_string())));
        assert!(errors.contains(&ValidationError::InvalidHeader("Content Type".to_string())));
    }

    #[test]
    fn empty_lists_rejected() {
        let cors = CorsConfig {
            allowed_origins: Vec::new(),
            ..CorsConfig::restricted()
        };
        assert_eq!(
            validate_cors(&cors),
            vec![ValidationError::EmptyList { field: "cors.allowed_origins" }]
        );
    }

    #[test]
    fn collects_every_error() {
        let mut config = ServerConfig::default();
        config.listener.bind_address = "localhost".to_string();
        config.source.table = " ".to_string();
        config.observability.log_level = "verbose".to_string();
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "nope".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn metrics_address_ignored_when_disabled() {
        let mut config = ServerConfig::default();
        config.observability.metrics_address = "nope".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
