//! CLI: filter documents through a declarative spec, or lint a spec.
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde_json::Value;

use crate::lint::{check_spec, Severity};
use crate::path_de::from_str_with_path;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// shape JSON documents to a declarative field spec, applying defaults and validation
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    /// increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// filter each input document and print the result
    Filter(FilterOut),
    /// lint a filter spec file
    Check(CheckSpec),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document.
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct FilterOut {
    /// filter spec: a JSON array of field descriptors
    #[arg(long, short)]
    spec: PathBuf,

    #[command(flatten)]
    input_settings: InputSettings,

    /// output file (stdout if omitted); left untouched when any document fails
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// pretty-print a single result
    #[arg(long)]
    pretty: bool,

    /// report elapsed filter time per document on stderr
    #[arg(long)]
    timing: bool,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct CheckSpec {
    /// filter spec to lint
    #[arg(long, short)]
    spec: PathBuf,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

/// One decoded input document, labelled for diagnostics.
struct Document {
    label: String,
    value: Value,
}

impl InputSettings {
    fn load_documents(&self) -> Result<Vec<Document>> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        let mut out = Vec::new();
        for source_path in source_paths {
            let source_path_str = source_path.to_string_lossy().to_string();
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read source file {source_path_str}"))?;

            let mut parsed = Vec::new();
            if self.ndjson {
                for (line_no, line) in source.lines().enumerate() {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let value = serde_json::from_str::<Value>(line).with_context(|| {
                        format!("failed to parse JSON at {source_path_str}:{}", line_no + 1)
                    })?;
                    parsed.push((format!("{source_path_str}:{}", line_no + 1), value));
                }
            } else {
                let value = serde_json::from_str::<Value>(&source)
                    .with_context(|| format!("failed to parse JSON source file {source_path_str}"))?;
                parsed.push((source_path_str.clone(), value));
            }

            for (label, value) in parsed {
                let value = self.select(&label, value)?;
                match self.jq_expr.as_ref() {
                    None => out.push(Document { label, value }),
                    Some(jq_expr) => {
                        let results = crate::jq_exec::run_jaq(jq_expr, &value).with_context(|| {
                            format!("failed to apply jq expression to {label}")
                        })?;
                        for value in results {
                            out.push(Document { label: label.clone(), value });
                        }
                    }
                }
            }
        }
        Ok(out)
    }

    fn select(&self, label: &str, value: Value) -> Result<Value> {
        let Some(pointer) = self.json_pointer.as_deref() else {
            return Ok(value);
        };
        match value.pointer(pointer) {
            Some(node) => Ok(node.clone()),
            None => bail!("JSON pointer {pointer} selects nothing in {label}"),
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn init_logging(&self) {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            match self.verbose {
                0 => tracing_subscriber::EnvFilter::new("warn"),
                1 => tracing_subscriber::EnvFilter::new("info"),
                2 => tracing_subscriber::EnvFilter::new("debug"),
                _ => tracing_subscriber::EnvFilter::new("trace"),
            }
        });

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    pub fn run(&self) -> Result<ExitCode> {
        match &self.cmd {
            Command::Filter(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(ExitCode::SUCCESS);
                }
                target.run().map(exit_code)
            }
            Command::Check(target) => target.run().map(exit_code),
        }
    }
}

impl FilterOut {
    /// Returns `false` when any document failed to filter. Nothing is
    /// written in that case, so output lines always map one-to-one onto
    /// input documents.
    fn run(&self) -> Result<bool> {
        let spec = load_spec(&self.spec)?;
        let documents = self.input_settings.load_documents()?;
        tracing::info!(documents = documents.len(), descriptors = spec.len(), "loaded inputs");

        let mut results = Vec::with_capacity(documents.len());
        let mut failed = false;
        for doc in &documents {
            let started = Instant::now();
            let result = json_sieve::filter_data(&doc.value, &spec);
            if self.timing {
                eprintln!(
                    "{}",
                    format!("{}: usetime={} usec", doc.label, started.elapsed().as_micros()).as_str().dimmed()
                );
            }
            match result {
                Ok(value) => results.push(value),
                Err(error) => {
                    failed = true;
                    eprintln!("{} {}: {error}", "validate error".red().bold(), doc.label);
                }
            }
        }

        if failed {
            tracing::warn!(documents = documents.len(), "filter failed; no output written");
            return Ok(false);
        }

        let rendered = render_results(&results, self.pretty)?;
        write_output(self.out.as_deref(), &rendered)?;

        Ok(!failed)
    }
}

impl CheckSpec {
    fn run(&self) -> Result<bool> {
        let path_str = self.spec.to_string_lossy().to_string();
        let source = std::fs::read_to_string(&self.spec)
            .with_context(|| format!("failed to read spec file {path_str}"))?;
        let report = check_spec(&source).with_context(|| format!("invalid spec {path_str}"))?;

        for finding in &report.findings {
            let tag = match finding.severity {
                Severity::Error => "error".red().bold(),
                Severity::Warning => "warning".yellow().bold(),
            };
            eprintln!("{tag} {path_str}{}: {}", finding.path, finding.message);
        }

        if report.has_errors() {
            return Ok(false);
        }
        println!("{} {path_str} ({} descriptors)", "ok".green().bold(), report.descriptors);
        Ok(true)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn exit_code(success: bool) -> ExitCode {
    if success { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn load_spec(path: &Path) -> Result<Vec<Value>> {
    let path_str = path.to_string_lossy();
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read spec file {path_str}"))?;
    from_str_with_path::<Vec<Value>>(&source)
        .with_context(|| format!("spec file {path_str} must be a JSON array of descriptors"))
}

/// A single result is printed as one document, several as NDJSON.
fn render_results(results: &[Value], pretty: bool) -> Result<String> {
    if let [single] = results {
        let text = if pretty {
            serde_json::to_string_pretty(single)?
        } else {
            serde_json::to_string(single)?
        };
        return Ok(text);
    }
    let mut out = String::new();
    for value in results {
        out.push_str(&serde_json::to_string(value)?);
        out.push('\n');
    }
    Ok(out.trim_end().to_string())
}

fn write_output(out: Option<&Path>, rendered: &str) -> Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(out, format!("{rendered}\n"))
                .with_context(|| format!("failed to write {}", out.display()))?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{rendered}")?;
        }
    }
    Ok(())
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn settings(input: Vec<String>) -> InputSettings {
        InputSettings { ndjson: false, json_pointer: None, jq_expr: None, input }
    }

    fn write(dir: &TempDir, name: &str, body: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn globs_expand_and_literals_pass_through() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.json", "{}");
        write(&dir, "b.json", "{}");
        let pattern = format!("{}/*.json", dir.path().display());
        let paths = resolve_file_path_patterns([pattern.as_str(), "literal.json"]).unwrap();
        assert_eq!(paths.len(), 3);
        assert_eq!(paths[2], PathBuf::from("literal.json"));
    }

    #[test]
    fn empty_glob_is_an_error() {
        let dir = TempDir::new().unwrap();
        let pattern = format!("{}/*.nothing", dir.path().display());
        assert!(resolve_file_path_patterns([pattern]).is_err());
    }

    #[test]
    fn ndjson_yields_one_document_per_line() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "rows.ndjson", "{\"a\":1}\n\n{\"a\":2}\n");
        let mut s = settings(vec![path]);
        s.ndjson = true;
        let docs = s.load_documents().unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].value, json!({"a": 2}));
        assert!(docs[1].label.ends_with(":3"));
    }

    #[test]
    fn json_pointer_selects_subnode() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "doc.json", r#"{"data": {"result": {"id": 7}}}"#);
        let mut s = settings(vec![path]);
        s.json_pointer = Some("/data/result".into());
        let docs = s.load_documents().unwrap();
        assert_eq!(docs[0].value, json!({"id": 7}));

        s.json_pointer = Some("/missing".into());
        assert!(s.load_documents().is_err());
    }

    #[test]
    fn spec_must_be_an_array() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "spec.json", r#"{"name": "a"}"#);
        assert!(load_spec(Path::new(&path)).is_err());
        let path = write(&dir, "spec2.json", r#"[{"name": "a", "type": "string"}]"#);
        assert_eq!(load_spec(Path::new(&path)).unwrap().len(), 1);
    }

    #[test]
    fn filter_writes_output_file() {
        let dir = TempDir::new().unwrap();
        let spec = write(&dir, "spec.json", r#"[{"name": "name", "type": "string"}]"#);
        let data = write(&dir, "data.json", r#"{"name": "Alice", "age": 30}"#);
        let out = dir.path().join("out/result.json");
        let cmd = FilterOut {
            spec: spec.into(),
            input_settings: settings(vec![data]),
            out: Some(out.clone()),
            pretty: false,
            timing: false,
            no_op: false,
        };
        assert!(cmd.run().unwrap());
        let written: Value = serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(written, json!({"name": "Alice"}));
    }

    #[test]
    fn filter_failure_sets_exit_code() {
        let dir = TempDir::new().unwrap();
        let spec = write(
            &dir,
            "spec.json",
            r#"[{"name": "age", "type": "integer", "validated": true, "required": true}]"#,
        );
        let data = write(&dir, "data.json", r#"{"age": "oops"}"#);
        let out = write(&dir, "result.json", r#"{"previous":true}"#);
        let cmd = FilterOut {
            spec: spec.into(),
            input_settings: settings(vec![data]),
            out: Some(out.clone().into()),
            pretty: false,
            timing: false,
            no_op: false,
        };
        assert!(!cmd.run().unwrap());
        assert_eq!(fs::read_to_string(&out).unwrap(), r#"{"previous":true}"#);
    }

    #[test]
    fn one_failing_document_suppresses_all_output() {
        let dir = TempDir::new().unwrap();
        let spec = write(
            &dir,
            "spec.json",
            r#"[{"name": "age", "type": "integer", "validated": true, "required": true}]"#,
        );
        let good = write(&dir, "good.json", r#"{"age": 1}"#);
        let bad = write(&dir, "bad.json", r#"{"age": null}"#);
        let out = dir.path().join("result.ndjson");
        let cmd = FilterOut {
            spec: spec.into(),
            input_settings: settings(vec![good, bad]),
            out: Some(out.clone()),
            pretty: false,
            timing: false,
            no_op: false,
        };
        assert!(!cmd.run().unwrap());
        assert!(!out.exists());
    }

    #[test]
    fn multiple_results_render_as_ndjson() {
        let text = render_results(&[json!({"a": 1}), json!({"a": 2})], true).unwrap();
        assert_eq!(text, "{\"a\":1}\n{\"a\":2}");
        let text = render_results(&[json!({"a": 1})], false).unwrap();
        assert_eq!(text, "{\"a\":1}");
    }
}
