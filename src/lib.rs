//! Schema-driven filtering and validation for untyped JSON trees.
//!
//! A filter spec is itself data: a list of field descriptors such as
//!
//! ```json
//! [
//!   { "name": "name", "type": "string", "validated": true, "required": true },
//!   { "name": "addr", "type": "map", "children": [ { "name": "city", "type": "string" } ] },
//!   { "name": "tags", "type": "array", "all": true }
//! ]
//! ```
//!
//! [`filter_data`] walks a document against such a list and returns a new
//! document holding only the declared fields, defaults filled in and
//! validation rules applied.
//!
//! ```
//! use serde_json::json;
//!
//! let data = json!({ "name": "Alice", "age": 30 });
//! let spec = json!([{ "name": "name", "type": "string", "required": true }]);
//! let out = json_sieve::filter_data(&data, spec.as_array().unwrap()).unwrap();
//! assert_eq!(out, json!({ "name": "Alice" }));
//! ```
pub mod coerce;
pub mod descriptor;
pub mod error;
pub mod filter;
pub mod kind;
pub mod node;
pub mod validate;

pub use coerce::{compute_default, decimal_value};
pub use descriptor::{parse_descriptor, FieldDescriptor};
pub use error::{FilterError, Result};
pub use filter::{filter_array, filter_data, filter_map};
pub use kind::TypeKind;
pub use node::{DataNode, ObjectNode};
pub use validate::{validate, validate_regexp, validate_with, PatternCache};
