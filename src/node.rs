//! The tree the engine walks.
//!
//! `DataNode` is plain `serde_json::Value`; with `preserve_order` enabled,
//! objects built by the filter iterate in the order their fields were assigned.
use serde_json::Value;

pub type DataNode = Value;
pub type ObjectNode = serde_json::Map<String, Value>;

/// Shared `null` for lookups that miss.
pub static NULL: DataNode = Value::Null;

/// String form of a node, the way the coercion rules see it.
///
/// Strings render unquoted, `null` renders empty, everything else renders as
/// compact JSON text.
pub fn render(node: &DataNode) -> String {
    match node {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn kind_name(node: &DataNode) -> &'static str {
    match node {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn render_scalars() {
        assert_eq!(render(&json!(null)), "");
        assert_eq!(render(&json!("5")), "5");
        assert_eq!(render(&json!(30)), "30");
        assert_eq!(render(&json!(2.5)), "2.5");
        assert_eq!(render(&json!(true)), "true");
    }

    #[test]
    fn render_containers_as_json() {
        assert_eq!(render(&json!({"a": 1})), r#"{"a":1}"#);
        assert_eq!(render(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn kind_names() {
        assert_eq!(kind_name(&json!({})), "object");
        assert_eq!(kind_name(&json!([])), "array");
        assert_eq!(kind_name(&NULL), "null");
    }
}
