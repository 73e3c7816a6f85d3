//! Test helpers shared by the typpo core and CLI crates: schema fixture lookup and
//! JSON output checks for the `typpo` binary.

use std::path::{Path, PathBuf};
use std::process::Output;

/// Workspace root, two levels above this crate's manifest.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Path of a schema document under `<workspace>/fixtures`, such as `types.yaml` or `types.json`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Assert that a finished command succeeded and parse its stdout as JSON.
pub fn stdout_json(output: &Output) -> serde_json::Value {
	assert!(
		output.status.success(),
		"command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}
