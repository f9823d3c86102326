use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;
use tracing::warn;

use crate::error::DirectoryError;
use crate::record::Record;

/// Load directory records from a JSON file: a top-level array of row
/// objects, each mapping field names to values.
///
/// Row tolerance: a non-object element, or a field whose value cannot be
/// rendered as a scalar, is skipped with a warning. File-level I/O and
/// parse failures are the only hard errors.
pub fn load_json_file(path: &Path) -> Result<Vec<Record>, DirectoryError> {
    let text = std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let value: Value = serde_json::from_str(&text).map_err(|source| DirectoryError::Json {
        path: path.display().to_string(),
        source,
    })?;

    let rows = match value {
        Value::Array(rows) => rows,
        _ => {
            return Err(DirectoryError::NotAnArray {
                path: path.display().to_string(),
            })
        }
    };

    let mut records = Vec::with_capacity(rows.len());
    for (idx, row) in rows.into_iter().enumerate() {
        match row {
            Value::Object(map) => {
                let mut fields = BTreeMap::new();
                for (key, val) in map {
                    match scalar(&val) {
                        Some(s) => {
                            fields.insert(key, s);
                        }
                        None => {
                            warn!(row = idx, field = %key, "skipping non-scalar field");
                        }
                    }
                }
                records.push(Record::from_raw_fields(fields));
            }
            other => {
                warn!(row = idx, kind = json_kind(&other), "skipping non-object row");
            }
        }
    }
    Ok(records)
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
