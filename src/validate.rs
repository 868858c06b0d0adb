//! Per-field validation rules: required, type, pattern, bounds.
//!
//! The first failing rule wins and names the field. Bounds follow two
//! conventions:
//!
//! - string/numeric: `min == 0 && max == 0` switches bounds off entirely;
//! - map/array: `max` applies when `> 0`, `min` applies when `>= 0`,
//!   independently of each other.
//!
//! Patterns are compiled once per [`PatternCache`]; the filter walk shares
//! one cache across every value it validates.
use std::cell::RefCell;
use std::collections::HashMap;

use regex::Regex;
use serde_json::Value;

use crate::descriptor::FieldDescriptor;
use crate::error::{FilterError, Result};
use crate::kind::TypeKind;
use crate::node::DataNode;

/// Compiled full-match patterns keyed by their source text.
#[derive(Debug, Default)]
pub struct PatternCache<'a> {
    compiled: RefCell<HashMap<&'a str, Regex>>,
}

impl<'a> PatternCache<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Like [`validate_regexp`], compiling `pattern` only on first use.
    /// Invalid patterns are not cached; they fail again on the next call.
    pub fn check(&self, name: &str, value: &str, pattern: &'a str) -> Result<()> {
        let cached = self.compiled.borrow().get(pattern).cloned();
        let re = match cached {
            Some(re) => re,
            None => {
                let re = compile_full(name, pattern)?;
                self.compiled.borrow_mut().insert(pattern, re.clone());
                re
            }
        };
        match_full(name, value, &re)
    }

    pub fn len(&self) -> usize {
        self.compiled.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Validate one value with a throwaway pattern cache.
pub fn validate(value: &DataNode, fd: &FieldDescriptor<'_>) -> Result<()> {
    validate_with(value, fd, &PatternCache::new())
}

/// Validate one value, reusing patterns already compiled in `patterns`.
pub fn validate_with<'a>(
    value: &DataNode,
    fd: &FieldDescriptor<'a>,
    patterns: &PatternCache<'a>,
) -> Result<()> {
    let name = fd.name;

    if fd.required && value.is_null() {
        return Err(FilterError::Required(name.to_string()));
    }

    match &fd.kind {
        TypeKind::String => {
            let Value::String(text) = value else {
                return Err(FilterError::NotString(name.to_string()));
            };
            if !fd.required && text.is_empty() {
                return Ok(());
            }
            // a pattern replaces the length checks
            if !fd.regexp.is_empty() {
                return patterns.check(name, text, fd.regexp);
            }
            if fd.scalar_bounds_active() {
                let len = text.len() as i64;
                if len > truncate(fd.max) {
                    return Err(FilterError::AboveMaxLength(name.to_string()));
                }
                if len < truncate(fd.min) {
                    return Err(FilterError::BelowMinLength(name.to_string()));
                }
            }
            Ok(())
        }
        TypeKind::Boolean => match value {
            Value::Bool(_) => Ok(()),
            _ => Err(FilterError::NotBoolean(name.to_string())),
        },
        TypeKind::Integer | TypeKind::Decimal | TypeKind::Number => {
            if !fd.required && value.is_null() {
                return Ok(());
            }
            // numeric strings are rejected here even though defaults coerce them
            let Some(number) = (match value {
                Value::Number(n) => n.as_f64(),
                _ => None,
            }) else {
                return Err(FilterError::NotNumber(name.to_string()));
            };
            if fd.scalar_bounds_active() {
                if number > fd.max {
                    return Err(FilterError::AboveMaxValue(name.to_string()));
                }
                if number < fd.min {
                    return Err(FilterError::BelowMinValue(name.to_string()));
                }
            }
            Ok(())
        }
        TypeKind::Map => {
            if !fd.required && value.is_null() {
                return Ok(());
            }
            let Value::Object(entries) = value else {
                return Err(FilterError::NotMap(name.to_string()));
            };
            let size = entries.len() as i64;
            if fd.max > 0.0 && size > truncate(fd.max) {
                return Err(FilterError::AboveMaxSize(name.to_string()));
            }
            if fd.min >= 0.0 && size < truncate(fd.min) {
                return Err(FilterError::BelowMinSize(name.to_string()));
            }
            Ok(())
        }
        TypeKind::Array => {
            if !fd.required && value.is_null() {
                return Ok(());
            }
            let Value::Array(items) = value else {
                return Err(FilterError::NotArray(name.to_string()));
            };
            let len = items.len() as i64;
            if fd.max > 0.0 && len > truncate(fd.max) {
                return Err(FilterError::AboveMaxLength(name.to_string()));
            }
            if fd.min >= 0.0 && len < truncate(fd.min) {
                return Err(FilterError::BelowMinLength(name.to_string()));
            }
            Ok(())
        }
        TypeKind::Other(_) => Ok(()),
    }
}

/// Checks that `value` matches `pattern` in full.
pub fn validate_regexp(name: &str, value: &str, pattern: &str) -> Result<()> {
    match_full(name, value, &compile_full(name, pattern)?)
}

fn compile_full(name: &str, pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|e| FilterError::InvalidPattern {
        field: name.to_string(),
        reason: e.to_string(),
    })
}

fn match_full(name: &str, value: &str, re: &Regex) -> Result<()> {
    if re.is_match(value) {
        Ok(())
    } else {
        Err(FilterError::PatternMismatch(name.to_string()))
    }
}

// Bounds compare against the whole part of the limit.
fn truncate(limit: f64) -> i64 {
    limit.trunc() as i64
}
