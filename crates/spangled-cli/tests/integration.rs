//! Integration tests for spangled CLI commands.
//!
//! These tests run the actual binary and verify end-to-end behavior.

use std::fs;
use std::process::{Command, Output};

fn spangled(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_spangled"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn kinds_command_lists_all_kinds() {
    let output = spangled(&["kinds"]);
    assert!(output.status.success());
    let listing = stdout(&output);
    for kind in ["grid", "short-sandwich", "long-sandwich", "pagoda", "side-pagoda", "cube", "quincunx"] {
        assert!(listing.contains(kind), "Should list {kind:?}");
    }
    assert!(listing.contains("saturated"), "Should list palettes");
}

#[test]
fn svg_command_writes_to_stdout() {
    let output = spangled(&["svg", "50"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let svg = stdout(&output);
    assert!(svg.starts_with("<?xml"), "Should have XML declaration");
    assert!(svg.contains("viewBox=\"0 0 7410 3900\""));
    assert!(svg.trim_end().ends_with("</svg>"), "Should close SVG element");
}

#[test]
fn svg_command_writes_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flag.svg");
    let output = spangled(&["svg", "48", "-o", path.to_str().unwrap(), "--width", "950"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).is_empty(), "Document should only go to the file");
    assert!(stderr(&output).contains("Wrote:"));

    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("width=\"950\""));
    assert_eq!(svg.matches("href=\"#star\"").count(), 47);
}

#[test]
fn layouts_command_json() {
    let output = spangled(&["layouts", "50", "--json", "--limit", "3"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["nstars"], 50);
    assert_eq!(json["canton_factor"], "247/175");
    let layouts = json["layouts"].as_array().unwrap();
    assert_eq!(layouts.len(), 3);
    assert_eq!(layouts[0]["layout"], serde_json::json!([5, 6, 4, 5]));
    assert_eq!(layouts[0]["kind"], "short-sandwich");
    assert_eq!(layouts[0]["score"], "74/35");
}

#[test]
fn layouts_command_kind_filter() {
    let output = spangled(&["layouts", "49", "--kinds", "grid", "--json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let layouts = json["layouts"].as_array().unwrap();
    assert_eq!(layouts[0]["layout"], serde_json::json!([7, 7, 0, 0]));
    assert!(layouts.iter().all(|l| l["kind"] == "grid"));
}

#[test]
fn quincunx_filter_needs_the_quincunx_taxonomy() {
    let output = spangled(&["layouts", "27", "--kinds", "quincunx"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("--quincunx"));

    let output = spangled(&["layouts", "27", "--kinds", "quincunx", "--quincunx", "--json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let layouts = json["layouts"].as_array().unwrap();
    assert!(layouts.iter().all(|l| l["kind"] == "quincunx"));
}

#[test]
fn layouts_command_table() {
    let output = spangled(&["layouts", "12"]);
    assert!(output.status.success());
    let table = stdout(&output);
    assert!(table.contains("(2, 3, 3, 2)"));
    assert!(table.contains("long-sandwich"));
}

#[test]
fn measure_command_json() {
    let output = spangled(&["measure", "5,6,4,5", "--json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["kind"], "short-sandwich");
    assert_eq!(json["check"], serde_json::Value::Null);
    let fields = json["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 10);
    assert_eq!(fields[0]["name"], "height");
    assert_eq!(fields[0]["normalized"], "3900");
    assert_eq!(fields[2]["exact"], "7/13");
}

#[test]
fn measure_command_accepts_a_star_count() {
    let output = spangled(&["measure", "48"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let table = stdout(&output);
    assert!(table.contains("(6, 8, 0, 0) (grid)"));
    assert!(table.contains("Check: ok"));
}

#[test]
fn invalid_arrangement_fails() {
    let output = spangled(&["measure", "3,6,2,3"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("invalid star arrangement (3, 6, 2, 3)"));
}

#[test]
fn three_stripes_are_unsupported() {
    let output = spangled(&["svg", "50", "--stripes", "3"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("not supported"));
}

#[test]
fn zero_stars_fail() {
    let output = spangled(&["svg", "0"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no star arrangement exists for 0 stars"));
}

#[test]
fn config_file_and_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("flag.yaml");
    fs::write(&config, "nstripes: 3\npalette: saturated\nheight: 10cm\n").unwrap();

    // Three stripes from the file cannot be drawn...
    let output = spangled(&["svg", "50", "--config", config.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));

    // ...but the command line wins.
    let output = spangled(&["svg", "50", "--config", config.to_str().unwrap(), "--stripes", "13"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let svg = stdout(&output);
    assert!(svg.contains("fill=\"#0000FF\""));
    assert!(svg.contains("height=\"10cm\""));
}

#[test]
fn bad_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("flag.yaml");
    fs::write(&config, "stripes: 13\n").unwrap();
    let output = spangled(&["svg", "50", "--config", config.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("failed to parse config file"));
}

#[test]
fn inspect_a_generated_flag() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flag.svg");
    let path = path.to_str().unwrap();
    assert!(spangled(&["svg", "50", "-o", path]).status.success());

    let output = spangled(&["inspect", path, "--json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["stars"], 50);
    assert_eq!(json["rects"], 3);
    assert_eq!(json["view_box"], serde_json::json!([0.0, 0.0, 7410.0, 3900.0]));
}

#[test]
fn verbose_logs_to_stderr() {
    let output = spangled(&["svg", "50", "-v"]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("best star layout"));
    assert!(stdout(&output).starts_with("<?xml"));
}

#[test]
fn unknown_command_and_help() {
    let output = spangled(&["frobnicate"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Unknown command"));

    let output = spangled(&["help"]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("Usage:"));
}
