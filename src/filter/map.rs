use crate::descriptor::parse_descriptor;
use crate::error::Result;
use crate::node::{DataNode, ObjectNode, NULL};
use crate::validate::PatternCache;

use super::filter_field;

/// Filter an object against an ordered list of raw descriptors.
///
/// `None` data or an empty spec yields an empty object. Output fields are
/// assigned in spec order.
pub fn filter_map(data: Option<&ObjectNode>, spec: &[DataNode]) -> Result<ObjectNode> {
    filter_map_with(data, spec, &PatternCache::new())
}

pub(crate) fn filter_map_with<'a>(
    data: Option<&ObjectNode>,
    spec: &'a [DataNode],
    patterns: &PatternCache<'a>,
) -> Result<ObjectNode> {
    let mut out = ObjectNode::new();
    let Some(data) = data else {
        return Ok(out);
    };

    for raw in spec {
        let fd = parse_descriptor(raw)?;
        let value = data.get(fd.name).unwrap_or(&NULL);
        if let Some(kept) = filter_field(value, &fd, patterns)? {
            out.insert(fd.name.to_string(), kept);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;
    use serde_json::{json, Value};

    fn obj(v: Value) -> ObjectNode {
        match v {
            Value::Object(m) => m,
            other => panic!("expected object, got {other}"),
        }
    }

    fn list(v: Value) -> Vec<Value> {
        match v {
            Value::Array(xs) => xs,
            other => panic!("expected list, got {other}"),
        }
    }

    #[test]
    fn none_data_is_empty() {
        let spec = list(json!([{"name": "a", "type": "string"}]));
        assert_eq!(filter_map(None, &spec), Ok(ObjectNode::new()));
    }

    #[test]
    fn empty_spec_skips_parsing() {
        let data = obj(json!({"a": 1}));
        assert_eq!(filter_map(Some(&data), &[]), Ok(ObjectNode::new()));
    }

    #[test]
    fn keeps_spec_order() {
        let data = obj(json!({"a": 1, "b": 2, "c": 3}));
        let spec = list(json!([
            {"name": "c", "type": "integer"},
            {"name": "a", "type": "integer"}
        ]));
        let out = filter_map(Some(&data), &spec).unwrap();
        assert_eq!(out.keys().collect::<Vec<_>>(), ["c", "a"]);
    }

    #[test]
    fn scalar_values_are_not_recoerced() {
        let data = obj(json!({"n": "12", "b": "yes"}));
        let spec = list(json!([
            {"name": "n", "type": "integer"},
            {"name": "b", "type": "boolean"}
        ]));
        assert_eq!(filter_map(Some(&data), &spec), Ok(obj(json!({"n": "12", "b": "yes"}))));
    }

    #[test]
    fn missing_scalar_without_default_is_omitted() {
        let data = obj(json!({}));
        let spec = list(json!([{"name": "x", "type": "string"}, {"name": "y", "type": "integer"}]));
        assert_eq!(filter_map(Some(&data), &spec), Ok(ObjectNode::new()));
    }

    #[test]
    fn explicit_null_takes_default() {
        let data = obj(json!({"flag": null}));
        let spec = list(json!([{"name": "flag", "type": "boolean", "default": "1"}]));
        assert_eq!(filter_map(Some(&data), &spec), Ok(obj(json!({"flag": true}))));
    }

    #[test]
    fn parse_error_aborts() {
        let data = obj(json!({"a": 1}));
        let spec = list(json!([{"name": "a", "type": "integer"}, {"type": "string"}]));
        assert_eq!(filter_map(Some(&data), &spec), Err(FilterError::EmptyName));
    }

    #[test]
    fn first_failure_wins() {
        let data = obj(json!({"a": "x", "b": "y"}));
        let spec = list(json!([
            {"name": "a", "type": "integer", "validated": true},
            {"name": "b", "type": "integer", "validated": true}
        ]));
        assert_eq!(filter_map(Some(&data), &spec), Err(FilterError::NotNumber("a".into())));
    }

    #[test]
    fn nested_errors_propagate() {
        let data = obj(json!({"outer": {"inner": {"v": 99}}}));
        let spec = list(json!([{
            "name": "outer", "type": "map", "children": [{
                "name": "inner", "type": "map", "children": [
                    {"name": "v", "type": "integer", "validated": true, "max": 10}
                ]
            }]
        }]));
        assert_eq!(filter_map(Some(&data), &spec), Err(FilterError::AboveMaxValue("v".into())));
    }

    #[test]
    fn map_without_children_filters_to_empty() {
        let data = obj(json!({"m": {"a": 1}}));
        let spec = list(json!([{"name": "m", "type": "map"}]));
        assert_eq!(filter_map(Some(&data), &spec), Ok(obj(json!({"m": {}}))));
    }
}
