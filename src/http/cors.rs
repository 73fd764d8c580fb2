//! Cross-origin policy for `/api/*`.
//!
//! The server never branches on origin itself. The layer decides which
//! `Access-Control-*` headers to emit and answers preflight requests; the
//! browser does the enforcing.

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::config::schema::{is_wildcard, CorsConfig};
use crate::config::validation::{validate_cors, ValidationError};

/// Build the CORS layer for a policy, rejecting malformed policies.
pub fn build_cors_layer(config: &CorsConfig) -> Result<CorsLayer, Vec<ValidationError>> {
    let errors = validate_cors(config);
    if !errors.is_empty() {
        return Err(errors);
    }

    let origins = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            config
                .allowed_origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok()),
        )
    };

    let methods = if is_wildcard(&config.allowed_methods) {
        AllowMethods::any()
    } else {
        AllowMethods::list(
            config
                .allowed_methods
                .iter()
                .filter_map(|m| m.to_ascii_uppercase().parse::<Method>().ok()),
        )
    };

    let headers = if is_wildcard(&config.allowed_headers) {
        AllowHeaders::any()
    } else {
        AllowHeaders::list(
            config
                .allowed_headers
                .iter()
                .filter_map(|h| HeaderName::from_bytes(h.as_bytes()).ok()),
        )
    };

    tracing::debug!(
        origins = ?config.allowed_origins,
        methods = ?config.allowed_methods,
        headers = ?config.allowed_headers,
        "CORS policy built"
    );

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers))
}
