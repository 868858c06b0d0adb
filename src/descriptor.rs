//! Raw declarative nodes → typed [`FieldDescriptor`].
//!
//! Decoding is key-presence driven and tolerant: a recognised key holding the
//! wrong JSON type reads as if it were absent.
//!
//! | key         | absent / wrong type   |
//! |-------------|-----------------------|
//! | `name`      | `""` → parse error    |
//! | `type`      | `""` → parse error    |
//! | `all`       | `false`               |
//! | `children`  | empty                 |
//! | `default`   | `null`                |
//! | `validated` | `false`               |
//! | `required`  | `false`               |
//! | `regexp`    | `""` (no pattern)     |
//! | `min`/`max` | `0` via tolerant coercion |
use serde_json::Value;

use crate::coerce::decimal_value;
use crate::error::{FilterError, Result};
use crate::kind::TypeKind;
use crate::node::{DataNode, ObjectNode, NULL};

/// One parsed filter rule. Borrows from the raw node it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor<'a> {
    pub name: &'a str,
    pub kind: TypeKind,
    pub all: bool,
    pub children: &'a [DataNode],
    pub default: &'a DataNode,
    pub validated: bool,
    pub required: bool,
    pub regexp: &'a str,
    pub min: f64,
    pub max: f64,
}

impl FieldDescriptor<'_> {
    /// String/numeric bounds are off when both are zero.
    pub fn scalar_bounds_active(&self) -> bool {
        !(self.min == 0.0 && self.max == 0.0)
    }
}

pub fn parse_descriptor(raw: &DataNode) -> Result<FieldDescriptor<'_>> {
    let obj = match raw {
        Value::Null => return Err(FilterError::NullFilter),
        Value::Object(obj) => obj,
        _ => return Err(FilterError::FilterNotMap),
    };

    let name = str_key(obj, "name");
    let type_name = str_key(obj, "type");
    if name.is_empty() {
        return Err(FilterError::EmptyName);
    }
    if type_name.is_empty() {
        return Err(FilterError::EmptyType);
    }

    Ok(FieldDescriptor {
        name,
        kind: TypeKind::parse(type_name),
        all: bool_key(obj, "all"),
        children: obj
            .get("children")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        default: obj.get("default").unwrap_or(&NULL),
        validated: bool_key(obj, "validated"),
        required: bool_key(obj, "required"),
        regexp: str_key(obj, "regexp"),
        min: num_key(obj, "min"),
        max: num_key(obj, "max"),
    })
}

fn str_key<'a>(obj: &'a ObjectNode, key: &str) -> &'a str {
    obj.get(key).and_then(Value::as_str).unwrap_or("")
}

fn bool_key(obj: &ObjectNode, key: &str) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn num_key(obj: &ObjectNode, key: &str) -> f64 {
    obj.get(key).map(decimal_value).unwrap_or(0.0)
}
