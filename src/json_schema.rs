//! JSON Schema generation for the structured JSON/YAML output.
//!
//! Schemas are generated using the schemars crate. The top-level document is
//! a map keyed by table name, so its schema wraps the per-table schema as
//! `additionalProperties`.

use crate::schema::StructuredTable;
use schemars::{schema_for, Schema};
use serde_json::{json, Value};

/// Schema of one table entry (`columns`, `foreignKeys`, `indexes`)
pub fn table_schema() -> Schema {
    schema_for!(StructuredTable)
}

/// Schema of a whole rendered dictionary, as a JSON value
pub fn dictionary_schema() -> Value {
    let mut table = serde_json::to_value(table_schema()).unwrap_or_else(|_| json!({}));

    // Definitions must live at the root for `$ref`s to resolve
    let defs = table
        .as_object_mut()
        .and_then(|o| o.remove("$defs"))
        .unwrap_or_else(|| json!({}));
    if let Some(obj) = table.as_object_mut() {
        obj.remove("$schema");
    }

    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "DataDictionary",
        "type": "object",
        "additionalProperties": table,
        "$defs": defs,
    })
}
