//! `check` support: strict reading of a filter spec file.
//!
//! The engine itself reads descriptors leniently. This module walks the same
//! nodes the engine would visit, decodes each through a typed model so that
//! wrong JSON types get reported with their path, then runs the engine's own
//! parser on it. Array children past the first are never visited.
use anyhow::Result;
use serde::Deserialize;
use serde_json::Value;

use json_sieve::{parse_descriptor, validate_regexp, FilterError, TypeKind};

use crate::path_de::from_str_with_path;

#[allow(unused)]
#[derive(Debug, Deserialize)]
struct SpecNode {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    all: bool,
    #[serde(default)]
    children: Option<Vec<Value>>,
    #[serde(default)]
    default: Option<Value>,
    #[serde(default)]
    validated: bool,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    regexp: Option<String>,
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub path: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Report {
    pub descriptors: usize,
    pub findings: Vec<Finding>,
}

impl Report {
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    fn error(&mut self, path: &str, message: String) {
        self.findings.push(Finding { severity: Severity::Error, path: path.to_string(), message });
    }

    fn warn(&mut self, path: &str, message: String) {
        self.findings.push(Finding { severity: Severity::Warning, path: path.to_string(), message });
    }
}

/// Lint the text of a spec file. Only a file that is not a JSON array is
/// returned as `Err`; everything else becomes a finding.
pub fn check_spec(src: &str) -> Result<Report> {
    let raw = from_str_with_path::<Vec<Value>>(src)?;
    let mut report = Report::default();
    walk(&raw, "", &mut report);
    Ok(report)
}

fn walk(nodes: &[Value], prefix: &str, report: &mut Report) {
    for (index, raw) in nodes.iter().enumerate() {
        let path = format!("{prefix}[{index}]");
        report.descriptors += 1;

        let node = match serde_path_to_error::deserialize::<_, SpecNode>(raw) {
            Ok(node) => node,
            Err(error) => {
                let at = match error.path().to_string() {
                    inner if inner == "." => path.clone(),
                    inner => format!("{path}.{inner}"),
                };
                report.error(&at, error.into_inner().to_string());
                continue;
            }
        };

        let fd = match parse_descriptor(raw) {
            Ok(fd) => fd,
            Err(error) => {
                report.error(&path, error.to_string());
                continue;
            }
        };

        if let TypeKind::Other(name) = &fd.kind {
            report.warn(&path, format!("unknown type \"{name}\" is passed through unvalidated"));
        }

        if !fd.regexp.is_empty() {
            if fd.kind != TypeKind::String {
                report.warn(&path, "regexp only applies to string fields".to_string());
            }
            if let Err(error @ FilterError::InvalidPattern { .. }) =
                validate_regexp(fd.name, "", fd.regexp)
            {
                report.error(&path, error.to_string());
            }
        }

        if fd.kind.is_container() && !fd.all {
            if node.children.is_none() {
                report.error(&path, format!("{} field is missing its children array", fd.kind));
                continue;
            }
            if fd.children.is_empty() {
                report.warn(&path, format!("{} field without children filters to empty", fd.kind));
            }
            let visited = if fd.kind == TypeKind::Array && fd.children.len() > 1 {
                report.warn(&path, "array children beyond the first are ignored".to_string());
                &fd.children[..1]
            } else {
                fd.children
            };
            walk(visited, &format!("{path}.children"), report);
        }
    }
}
