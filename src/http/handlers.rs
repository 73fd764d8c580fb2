//! Route handlers.

use axum::{extract::State, http::StatusCode, Json};
use std::time::Instant;
use tokio::task::JoinError;

use crate::http::server::AppState;
use crate::observability::metrics;
use crate::source::{FetchError, TableData};

/// Body of `GET /`.
pub const READY_MESSAGE: &str = "O servidor de dados está rodando!";

/// Liveness check.
pub async fn root() -> &'static str {
    READY_MESSAGE
}

/// `GET /api/dados`: the whole table as JSON, or 500 with the error mapping.
pub async fn get_dados(State(state): State<AppState>) -> Result<Json<TableData>, FetchError> {
    let source = state.source.clone();
    let start = Instant::now();

    let result = match tokio::task::spawn_blocking(move || source.fetch_table_data()).await {
        Ok(result) => result,
        Err(e) => Err(FetchError::new(describe_join_error(e))),
    };

    let table = state.source.table();
    metrics::record_fetch(table, result.is_ok(), start);

    match &result {
        Ok(data) => tracing::debug!(table = %table, rows = row_count(data), "Table fetched"),
        Err(e) => tracing::error!(table = %table, error = %e, "Table fetch failed"),
    }

    result.map(Json)
}

/// `HEAD /api/dados`: connectivity check that never touches the source.
pub async fn head_dados() -> StatusCode {
    StatusCode::OK
}

fn row_count(data: &TableData) -> usize {
    data.as_array().map_or(1, Vec::len)
}

fn describe_join_error(err: JoinError) -> String {
    if !err.is_panic() {
        return "table fetch was cancelled".to_string();
    }

    let payload = err.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("table fetch panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("table fetch panicked: {message}")
    } else {
        "table fetch panicked".to_string()
    }
}
