#![allow(missing_docs)]

use std::process::{Command, Output};

use serde_json::Value;
use typpo_testkit::{fixture_path, stdout_json};

#[test]
fn types_json_lists_frame_size_per_target() {
	let arm = run_json(&["types", &schema(), "--json"]);
	assert_eq!(arm["target"], "ARM");
	assert_eq!(arm["native_size"], 4);
	assert_eq!(type_row(&arm, "ngl_frame")["size"], 68);
	assert!(type_row(&arm, "MAX_MOTORS")["size"].is_null(), "constants have no size");

	let wide = run_json(&["types", &schema(), "--target", "x86_64", "--json"]);
	assert_eq!(type_row(&wide, "ngl_frame")["size"], 72);
}

#[test]
fn types_json_reports_field_offsets() {
	let json = run_json(&["types", &schema(), "--type", "ngl_motor", "--json"]);
	let offsets: Vec<u64> = json["fields"]
		.as_array()
		.expect("fields array")
		.iter()
		.filter_map(|field| field["offset"].as_u64())
		.collect();
	assert_eq!(offsets, vec![0, 2, 4]);
	assert_eq!(json["size"], 8);
	assert!(json["accessor"].is_null());
}

#[test]
fn types_json_names_scalar_accessor() {
	let json = run_json(&["types", &schema(), "--type", "uint32_be", "--json"]);
	assert_eq!(json["accessor"], "UInt32BE");

	let pointer = run_json(&["types", &schema(), "--type", "ngl_motor*", "--target", "x86_64", "--json"]);
	assert_eq!(pointer["size"], 8);
	assert_eq!(pointer["accessor"], "UInt64LE");
}

#[test]
fn write_then_read_motor() {
	let output = run(&["write", &schema(), "ngl_motor", "--value", r#"{"port":1,"speed":-2,"position":3}"#]);
	assert!(output.status.success(), "write should succeed");
	let hex = String::from_utf8_lossy(&output.stdout).trim().to_owned();
	assert_eq!(hex, "0100feff03000000");

	let json = run_json(&["read", &schema(), "ngl_motor", "--hex", &hex, "--json"]);
	assert_eq!(json["size"], 8);
	assert_eq!(json["value"], serde_json::json!({ "port": 1, "speed": -2, "position": 3 }));
}

#[test]
fn read_honors_offset_and_union_default() {
	let json = run_json(&["read", &schema(), "ngl_reading", "--hex", "ffff 2a000000", "--offset", "2", "--json"]);
	assert_eq!(json["offset"], 2);
	assert_eq!(json["value"], serde_json::json!({ "integer": 42 }));
}

#[test]
fn write_rejects_out_of_range_value() {
	let output = run(&["write", &schema(), "uint8_t", "--value", "256"]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).starts_with("error:"));
}

#[test]
fn write_sizes_open_array_slot_from_its_items() {
	let json = run_json(&["write", &schema(), "ngl_samples", "--value", r#"{"count":2,"data":[7,8]}"#, "--json"]);
	assert_eq!(json["size"], 12);
	assert_eq!(json["hex"], "020000000700000008000000");

	let open = run_json(&["write", &schema(), "int32_t[]", "--value", "[7,8]", "--json"]);
	assert_eq!(open["hex"], "0700000008000000");
}

#[test]
fn write_reports_malformed_value_document() {
	let output = run(&["write", &schema(), "ngl_motor", "--value", "{\"port\":"]);
	assert!(!output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("invalid value input"), "stderr: {stderr}");
	assert!(!stderr.contains("schema"), "stderr: {stderr}");
}

#[test]
fn read_rejects_unknown_target_and_bad_hex() {
	assert!(!run(&["read", &schema(), "uint8_t", "--hex", "00", "--target", "sparc"]).status.success());

	let output = run(&["read", &schema(), "uint8_t", "--hex", "0g"]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("invalid hex input"));
}

fn schema() -> String {
	fixture_path("types.yaml").display().to_string()
}

fn type_row<'a>(json: &'a Value, name: &str) -> &'a Value {
	json["types"]
		.as_array()
		.and_then(|rows| rows.iter().find(|row| row["name"] == name))
		.unwrap_or_else(|| panic!("type {name} listed"))
}

fn run(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_typpo")).args(args).output().expect("command executes")
}

fn run_json(args: &[&str]) -> Value {
	stdout_json(&run(args))
}
