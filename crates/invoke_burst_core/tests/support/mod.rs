#![allow(dead_code)]

pub mod invokers;

use std::path::Path;

use invoke_burst_core::RunConfig;

pub fn run_config(output: &Path, call_count: usize) -> RunConfig {
    RunConfig {
        region: "eu-central-1".to_string(),
        profile: String::new(),
        function: "load-target".to_string(),
        result_file: output.to_path_buf(),
        call_count,
    }
}

pub fn read_entries(output: &Path) -> Vec<serde_json::Value> {
    let bytes = std::fs::read(output).expect("output file");
    match serde_json::from_slice(&bytes).expect("output should be a JSON array") {
        serde_json::Value::Array(entries) => entries,
        other => panic!("expected array, got {other}"),
    }
}
