//! Static specimens list
//!
//! A hand-maintained JSON array of specimen descriptions. It is not linked to
//! scan rows; the service only reads and displays it.

use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::error::{ApiError, ApiResult};

/// Fields tried, in order, when picking a display name for an entry
const NAME_FIELDS: [&str; 5] = ["name", "common_name", "scientific_name", "title", "id"];

/// Load the specimens file
///
/// A missing file is an empty list. Anything other than a JSON array is an
/// internal error naming the file.
pub async fn load_specimens(path: &Path) -> ApiResult<Vec<Value>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No specimens file");
            return Ok(Vec::new());
        }
        Err(e) => return Err(ApiError::Io(e)),
    };

    let parsed: Value = serde_json::from_str(&content).map_err(|e| {
        ApiError::Internal(format!("Invalid specimens file {}: {}", path.display(), e))
    })?;

    match parsed {
        Value::Array(items) => Ok(items),
        _ => Err(ApiError::Internal(format!(
            "Invalid specimens file {}: expected a JSON array",
            path.display()
        ))),
    }
}

/// Display name for the entry at `index` (zero-based)
pub fn display_name(entry: &Value, index: usize) -> String {
    if let Value::Object(map) = entry {
        for field in NAME_FIELDS {
            match map.get(field) {
                Some(Value::String(s)) if !s.trim().is_empty() => return s.clone(),
                Some(Value::Number(n)) if field == "id" => return format!("Specimen {}", n),
                _ => {}
            }
        }
    }
    if let Value::String(s) = entry {
        if !s.trim().is_empty() {
            return s.clone();
        }
    }
    format!("Specimen {}", index + 1)
}

/// Scalar fields of an entry as `(key, text)` pairs, skipping nested values
pub fn scalar_fields(entry: &Value) -> Vec<(String, String)> {
    let Value::Object(map) = entry else {
        return Vec::new();
    };

    map.iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return None,
            };
            Some((key.clone(), text))
        })
        .collect()
}
