//! Table data collaborator.
//!
//! # Data Flow
//! ```text
//! GET /api/dados
//!     → handler (blocking pool)
//!     → TableSource::fetch_table_data()
//!     → Ok(data)            → 200 + data as JSON
//!     → Err(FetchError)     → 500 + the error mapping, unchanged
//! ```
//!
//! # Design Decisions
//! - The seam is synchronous; callers move it off the async runtime
//! - One error kind; its mapping goes to the client verbatim
//! - Sources are stateless between calls

pub mod json_file;
pub mod memory;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};
use thiserror::Error;

pub use json_file::JsonFileSource;
pub use memory::StaticSource;

/// Key whose presence marks an error mapping.
pub const ERROR_KEY: &str = "error";

/// What a source returned on success: normally an array of row objects
/// (column name to scalar or null), passed through without interpretation.
pub type TableData = Value;

/// The table could not be read.
///
/// Holds the full error mapping sent to the client. It always contains
/// [`ERROR_KEY`]; any other keys ride along untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{}", describe(.body))]
pub struct FetchError {
    body: Map<String, Value>,
}

fn describe(body: &Map<String, Value>) -> String {
    match body.get(ERROR_KEY) {
        Some(Value::String(message)) => message.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

impl FetchError {
    /// `{"error": message}`.
    pub fn new(message: impl Into<String>) -> Self {
        let mut body = Map::new();
        body.insert(ERROR_KEY.to_string(), Value::String(message.into()));
        Self { body }
    }

    /// Adopt a mapping as-is if it carries [`ERROR_KEY`]; otherwise hand it back.
    pub fn from_sentinel(body: Map<String, Value>) -> Result<Self, Map<String, Value>> {
        if body.contains_key(ERROR_KEY) {
            Ok(Self { body })
        } else {
            Err(body)
        }
    }

    /// The `error` value as text. Non-string values are rendered as JSON.
    pub fn message(&self) -> String {
        describe(&self.body)
    }

    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }
}

impl IntoResponse for FetchError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self.body)).into_response()
    }
}

/// Provides the rows of one table.
pub trait TableSource: Send + Sync + 'static {
    /// Table name, for logs and metric labels.
    fn table(&self) -> &str;

    /// Read the full table. May block.
    fn fetch_table_data(&self) -> Result<TableData, FetchError>;
}
