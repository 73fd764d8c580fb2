//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → request.rs (request ID, request span)
//!     → middleware/ (metrics)
//!     → server.rs (route dispatch)
//!     → cors.rs (on /api/* only)
//!     → handlers.rs (call the table source, shape the response)
//!     → Send to client
//! ```

pub mod cors;
pub mod handlers;
pub mod middleware;
pub mod request;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{AppState, HttpServer, API_DADOS_PATH};
