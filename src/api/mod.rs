pub mod attendance;
pub mod employee;

use serde_json::Value;

/// Textual form of a loosely typed JSON field.
///
/// Numbers and booleans are coerced to text; `null`, arrays, and objects
/// count as absent so that field rules report them as missing.
pub(crate) fn text_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
