//! Rows exported to a JSON file.
//!
//! The file is re-read on every fetch so a fresh export is served without a
//! restart. An object carrying an `error` key is an export that failed
//! upstream and is reported as such; any other JSON (normally an array of
//! row objects) is served as-is.

use serde_json::Value;
use std::fs;
use std::path::PathBuf;

use crate::source::{FetchError, TableData, TableSource};

/// Reads a table from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    table: String,
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(table: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            table: table.into(),
            path: path.into(),
        }
    }
}

impl TableSource for JsonFileSource {
    fn table(&self) -> &str {
        &self.table
    }

    fn fetch_table_data(&self) -> Result<TableData, FetchError> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            FetchError::new(format!("failed to read {}: {}", self.path.display(), e))
        })?;

        let value: Value = serde_json::from_str(&content).map_err(|e| {
            FetchError::new(format!("failed to parse {}: {}", self.path.display(), e))
        })?;

        table_from_value(value)
    }
}

fn table_from_value(value: Value) -> Result<TableData, FetchError> {
    match value {
        Value::Object(map) => match FetchError::from_sentinel(map) {
            Ok(err) => Err(err),
            Err(map) => Ok(Value::Object(map)),
        },
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn temp_file(content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("dados-{}.json", uuid::Uuid::new_v4()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn reads_rows_in_order() {
        let path = temp_file(r#"[{"id": 1, "nome": "Convenio A"}, {"id": 2, "nome": null}]"#);
        let source = JsonFileSource::new("Convenio", &path);

        let data = source.fetch_table_data().unwrap();
        assert_eq!(
            data,
            json!([{ "id": 1, "nome": "Convenio A" }, { "id": 2, "nome": null }])
        );

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn picks_up_file_changes() {
        let path = temp_file("[]");
        let source = JsonFileSource::new("Convenio", &path);
        assert_eq!(source.fetch_table_data().unwrap(), json!([]));

        fs::write(&path, r#"[{"id": 7}]"#).unwrap();
        assert_eq!(source.fetch_table_data().unwrap(), json!([{ "id": 7 }]));

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file_is_fetch_error() {
        let source = JsonFileSource::new("Convenio", "/nonexistent/convenio.json");
        let err = source.fetch_table_data().unwrap_err();
        assert!(err.message().starts_with("failed to read /nonexistent/convenio.json"));
    }

    #[test]
    fn invalid_json_is_fetch_error() {
        let path = temp_file("[{");
        let err = JsonFileSource::new("Convenio", &path)
            .fetch_table_data()
            .unwrap_err();
        assert!(err.message().starts_with("failed to parse"));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn error_object_becomes_fetch_error() {
        let err = table_from_value(json!({ "error": "connection refused" })).unwrap_err();
        assert_eq!(err, FetchError::new("connection refused"));
    }

    #[test]
    fn error_object_is_kept_whole() {
        let input = json!({ "error": "x", "code": 7 });
        let err = table_from_value(input.clone()).unwrap_err();
        assert_eq!(Value::Object(err.body().clone()), input);

        let structured = json!({ "error": { "code": 1 } });
        let err = table_from_value(structured.clone()).unwrap_err();
        assert_eq!(Value::Object(err.body().clone()), structured);
    }

    #[test]
    fn object_without_error_key_is_data() {
        let input = json!({ "total": 2, "itens": [{ "id": 1 }] });
        assert_eq!(table_from_value(input.clone()).unwrap(), input);
    }

    #[test]
    fn error_file_is_served_as_failure() {
        let path = temp_file(r#"{"error": "export failed", "at": "2024-05-01"}"#);
        let err = JsonFileSource::new("Convenio", &path)
            .fetch_table_data()
            .unwrap_err();
        assert_eq!(err.message(), "export failed");
        assert_eq!(err.body()["at"], json!("2024-05-01"));
        fs::remove_file(path).unwrap();
    }
}
