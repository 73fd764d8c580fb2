//! Table data HTTP server library.
//!
//! Serves the rows of one table as JSON on `/api/dados`, behind a
//! configurable CORS policy.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod source;

pub use config::schema::ServerConfig;
pub use error::ServerError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use source::{FetchError, JsonFileSource, StaticSource, TableSource};
