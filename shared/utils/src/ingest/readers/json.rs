//! JSON reader: a single object or an array of objects.

use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{NurtureError, NurtureResult};
use crate::ingest::row::{RawRow, RawValue};

/// Reads JSON text into raw rows.
///
/// An array yields one row per element; any other document is a single row.
/// Elements that are not objects produce an empty row.
pub fn read_rows(data: &[u8]) -> NurtureResult<Vec<RawRow>> {
    let root: JsonValue = serde_json::from_slice(data)
        .map_err(|e| NurtureError::json(format!("Invalid JSON: {}", e)))?;

    let rows: Vec<RawRow> = match &root {
        JsonValue::Array(items) => items.iter().map(object_to_row).collect(),
        single => vec![object_to_row(single)],
    };

    debug!(rows = rows.len(), "Read JSON rows");
    Ok(rows)
}

fn object_to_row(value: &JsonValue) -> RawRow {
    match value {
        JsonValue::Object(map) => map
            .iter()
            .map(|(key, value)| (key.as_str(), RawValue::from_json(value)))
            .collect(),
        _ => RawRow::new(),
    }
}
