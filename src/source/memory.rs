//! In-memory source with a fixed result.

use crate::source::{FetchError, TableData, TableSource};

/// Returns the same rows (or the same error) on every call.
#[derive(Debug, Clone)]
pub struct StaticSource {
    table: String,
    result: Result<TableData, FetchError>,
}

impl StaticSource {
    pub fn rows(table: impl Into<String>, rows: TableData) -> Self {
        Self {
            table: table.into(),
            result: Ok(rows),
        }
    }

    pub fn failing(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::failing_with(table, FetchError::new(message))
    }

    pub fn failing_with(table: impl Into<String>, error: FetchError) -> Self {
        Self {
            table: table.into(),
            result: Err(error),
        }
    }
}

impl TableSource for StaticSource {
    fn table(&self) -> &str {
        &self.table
    }

    fn fetch_table_data(&self) -> Result<TableData, FetchError> {
        self.result.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn returns_configured_rows() {
        let rows = json!([{ "id": 1, "nome": "Convenio A" }]);
        let source = StaticSource::rows("Convenio", rows.clone());
        assert_eq!(source.table(), "Convenio");
        assert_eq!(source.fetch_table_data().unwrap(), rows);
    }

    #[test]
    fn returns_configured_error() {
        let source = StaticSource::failing("Convenio", "connection refused");
        assert_eq!(
            source.fetch_table_data().unwrap_err().message(),
            "connection refused"
        );
    }
}
