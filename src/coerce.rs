//! Defaulting and tolerant numeric coercion.
//!
//! Coercion here is deliberately forgiving: anything that does not read as a
//! float becomes `0`. It only feeds defaults and `min`/`max` extraction; the
//! validator does its own strict type checks.
use serde_json::{Map, Number, Value};

use crate::kind::TypeKind;
use crate::node::{render, DataNode};

/// Float reading of a node: `null` is `0`, otherwise the string form is parsed
/// and parse failures yield `0`.
pub fn decimal_value(node: &DataNode) -> f64 {
    if node.is_null() {
        return 0.0;
    }
    render(node).parse::<f64>().unwrap_or(0.0)
}

/// Lenient boolean reading of a string form. Unrecognised text is `false`.
pub fn parse_bool_lenient(text: &str) -> bool {
    matches!(text, "1" | "t" | "T" | "TRUE" | "true" | "True")
}

/// Value used in place of a missing/`null` field, cast to the declared type.
pub fn compute_default(raw: &DataNode, kind: &TypeKind) -> DataNode {
    let text = render(raw);
    let empty = raw.is_null() || text.is_empty();

    match kind {
        TypeKind::Integer => {
            if empty {
                return Value::Null;
            }
            let f = decimal_value(raw);
            if f.is_finite() { Value::from(f.trunc() as i64) } else { Value::Null }
        }
        TypeKind::Decimal | TypeKind::Number => {
            if empty {
                return Value::Null;
            }
            Number::from_f64(decimal_value(raw)).map(Value::Number).unwrap_or(Value::Null)
        }
        TypeKind::Boolean => {
            if empty {
                return Value::Null;
            }
            Value::Bool(parse_bool_lenient(&text))
        }
        TypeKind::Map => Value::Object(Map::new()),
        TypeKind::Array => Value::Array(Vec::new()),
        TypeKind::String | TypeKind::Other(_) => raw.clone(),
    }
}
