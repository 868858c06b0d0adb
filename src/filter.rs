//! Recursive filter/validate engine.
//!
//! Walk a data tree against a list of raw field descriptors and build a new
//! tree holding only the declared fields, with defaults filled in and
//! validation applied on the way.
//!
//! - Objects are filtered by an ordered list of descriptors ([`filter_map`]).
//! - Lists are filtered by one homogeneous descriptor, `spec[0]` ([`filter_array`]).
//! - Nested `map`/`array` fields recurse unless `all` is set, in which case
//!   the value is copied verbatim.
//! - The first error anywhere aborts the whole walk; there is no partial result.
//!
//! Descriptors are re-parsed on every call. Compiled `regexp` patterns are
//! shared for the length of one call and dropped afterwards.
pub mod array;
pub mod map;

use std::borrow::Cow;

use serde_json::Value;
use tracing::{debug, trace};

use crate::coerce::compute_default;
use crate::descriptor::FieldDescriptor;
use crate::error::{FilterError, Result};
use crate::kind::TypeKind;
use crate::node::{kind_name, DataNode};
use crate::validate::{validate_with, PatternCache};

pub use array::filter_array;
pub use map::filter_map;

/// Entry point: route an object to [`filter_map`] and a list to [`filter_array`].
///
/// Anything else is rejected before any recursion with
/// [`FilterError::InvalidDataBus`].
pub fn filter_data(data_bus: &DataNode, spec: &[DataNode]) -> Result<DataNode> {
    debug!(shape = kind_name(data_bus), descriptors = spec.len(), "filtering data bus");
    let patterns = PatternCache::new();
    match data_bus {
        Value::Object(obj) => map::filter_map_with(Some(obj), spec, &patterns).map(Value::Object),
        Value::Array(items) => {
            array::filter_array_with(Some(items.as_slice()), spec, &patterns).map(Value::Array)
        }
        _ => Err(FilterError::InvalidDataBus),
    }
}

/// Resolve one value against its descriptor: default it, validate it, then
/// shape it by declared type.
///
/// Returns `None` when a scalar field resolves to `null` and must be left out.
pub(crate) fn filter_field<'a>(
    value: &DataNode,
    fd: &FieldDescriptor<'a>,
    patterns: &PatternCache<'a>,
) -> Result<Option<DataNode>> {
    trace!(field = fd.name, kind = %fd.kind, "filtering field");

    let value: Cow<'_, DataNode> = if value.is_null() {
        Cow::Owned(compute_default(fd.default, &fd.kind))
    } else {
        Cow::Borrowed(value)
    };

    if fd.validated {
        validate_with(&value, fd, patterns).inspect_err(|error| {
            debug!(field = fd.name, %error, "validation failed");
        })?;
    }

    match &fd.kind {
        TypeKind::Map | TypeKind::Array if fd.all => Ok(Some(value.into_owned())),
        TypeKind::Map => match &*value {
            Value::Object(obj) => {
                map::filter_map_with(Some(obj), fd.children, patterns).map(|out| Some(Value::Object(out)))
            }
            _ => Err(FilterError::NotMap(fd.name.to_string())),
        },
        TypeKind::Array => match &*value {
            Value::Array(items) => {
                array::filter_array_with(Some(items.as_slice()), fd.children, patterns)
                    .map(|out| Some(Value::Array(out)))
            }
            _ => Err(FilterError::NotArray(fd.name.to_string())),
        },
        _ if value.is_null() => Ok(None),
        _ => Ok(Some(value.into_owned())),
    }
}
