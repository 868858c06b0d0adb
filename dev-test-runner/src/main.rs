//! Demo harness: filter a bundled fixture, then time a large synthetic document.
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use serde_json::{json, Value};

const BIG_RESULT_SETS: usize = 4;
const BIG_ROWS_PER_SET: usize = 5_000;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

fn read_json(name: &str) -> Result<Value> {
    let path = fixture(name);
    let source = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&source).with_context(|| format!("failed to parse {}", path.display()))
}

fn as_spec(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(spec) => Ok(spec),
        other => anyhow::bail!("filter spec must be an array, got {other}"),
    }
}

fn run_simple_case() -> Result<()> {
    println!("*********** Test Filter Simple ************");
    let databus = read_json("databus_simple.json")?;
    let spec = as_spec(read_json("filter_simple.json")?)?;

    let started = Instant::now();
    let result = json_sieve::filter_data(&databus, &spec);
    let elapsed = started.elapsed();

    match result {
        Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        Err(error) => {
            println!("------- validate error --------");
            println!("{error}");
            println!("-------------------------------");
        }
    }
    println!("usetime={} usec", elapsed.as_micros());
    Ok(())
}

fn big_row(i: usize) -> Value {
    json!({
        "id": i,
        "code": format!("R{i:06}"),
        "title": format!("row number {i}"),
        "amount": (i % 1000) as f64 / 4.0,
        "flags": {"archived": i % 7 == 0, "starred": i % 3 == 0},
        "history": [{"at": i, "by": "system"}, {"at": i + 1, "by": "user"}],
        "blob": "x".repeat(64)
    })
}

fn big_databus() -> Value {
    let mut data = serde_json::Map::new();
    for set in 0..BIG_RESULT_SETS {
        let key = if set == 0 { "result".to_string() } else { format!("result{}", set + 1) };
        let rows: Vec<Value> = (0..BIG_ROWS_PER_SET).map(big_row).collect();
        data.insert(key, Value::Array(rows));
    }
    json!({ "data": data })
}

fn big_filter() -> Vec<Value> {
    let row = json!({"name": "row", "type": "map", "children": [
        {"name": "id", "type": "integer", "validated": true, "required": true},
        {"name": "code", "type": "string", "validated": true, "regexp": "R\\d{6}"},
        {"name": "amount", "type": "decimal", "validated": true, "min": 0, "max": 1000},
        {"name": "flags", "type": "map", "children": [{"name": "archived", "type": "boolean"}]},
        {"name": "history", "type": "array", "children": [
            {"name": "entry", "type": "map", "children": [{"name": "by", "type": "string"}]}
        ]}
    ]});
    let sets: Vec<Value> = (0..BIG_RESULT_SETS)
        .map(|set| {
            let key = if set == 0 { "result".to_string() } else { format!("result{}", set + 1) };
            json!({"name": key, "type": "array", "children": [row.clone()]})
        })
        .collect();
    vec![json!({"name": "data", "type": "map", "children": sets})]
}

fn run_big_case() -> Result<()> {
    println!("*********** Test Filter Big Json ************");
    let databus = big_databus();
    let spec = big_filter();

    let started = Instant::now();
    let result = json_sieve::filter_data(&databus, &spec);
    let elapsed = started.elapsed();

    match result {
        Ok(value) => {
            let rows: usize = value["data"]
                .as_object()
                .map(|sets| sets.values().filter_map(Value::as_array).map(Vec::len).sum())
                .unwrap_or(0);
            println!("kept {rows} rows");
        }
        Err(error) => println!("validate error: {error}"),
    }
    println!("usetime={} usec", elapsed.as_micros());
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    run_simple_case()?;
    run_big_case()?;
    tracing::info!("demo finished");
    Ok(())
}
