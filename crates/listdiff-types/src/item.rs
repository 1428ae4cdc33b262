//! Records compared by the diff engine.
//!
//! An [`Item`] is an ordered field table: fields enumerate in insertion order,
//! which keeps field-level change lists deterministic.

use serde_json::{Map, Value};

use crate::error::TypeError;

/// An ordered record mapping field names to values.
pub type Item = Map<String, Value>;

/// Convert a single JSON value into a record.
///
/// `index` is only used to report where a non-object value was found.
pub fn item_from_value(index: usize, value: Value) -> Result<Item, TypeError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(TypeError::NotAnObject {
            index,
            found: kind_of(&other),
        }),
    }
}

/// Convert a JSON array of objects into a list of records.
pub fn items_from_value(value: Value) -> Result<Vec<Item>, TypeError> {
    match value {
        Value::Array(values) => values
            .into_iter()
            .enumerate()
            .map(|(index, value)| item_from_value(index, value))
            .collect(),
        other => Err(TypeError::NotAnArray {
            found: kind_of(&other),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
