//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Apply the CORS policy to `/api/*` only
//! - Wire up middleware (request ID, tracing, metrics)
//! - Serve on a listener until the shutdown signal fires

use axum::{middleware, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{ConfigError, ServerConfig};
use crate::http::cors::build_cors_layer;
use crate::http::handlers;
use crate::http::middleware::track_metrics;
use crate::http::request::{make_request_span, MakeRequestUuidV4};
use crate::source::TableSource;

/// Path of the table endpoint.
pub const API_DADOS_PATH: &str = "/api/dados";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn TableSource>,
}

/// HTTP server for the table endpoint.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server serving `source` under `config`.
    pub fn new(config: ServerConfig, source: Arc<dyn TableSource>) -> Result<Self, ConfigError> {
        let cors = build_cors_layer(&config.cors).map_err(ConfigError::Validation)?;

        tracing::info!(
            table = %source.table(),
            any_origin = config.cors.allows_any_origin(),
            "HTTP server configured"
        );

        let router = Self::build_router(AppState { source }, cors);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState, cors: CorsLayer) -> Router {
        let api: Router<AppState> = Router::new()
            .route(API_DADOS_PATH, get(handlers::get_dados).head(handlers::head_dados))
            .layer(cors);

        Router::new()
            .route("/", get(handlers::root))
            .merge(api)
            .with_state(state)
            .layer(middleware::from_fn(track_metrics))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// A clone of the fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until a message arrives on `shutdown`.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
