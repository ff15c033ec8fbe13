use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Response body shared by the CLI tests.
pub const RESPONSE: &str = r#"{
  "count": 2,
  "results": [{ "key": "workspaces", "id": "10" }, { "key": "workspaces", "id": "11" }],
  "workspaces": {
    "10": { "id": "10", "title": "some project", "participant_ids": ["2", "6"], "primary_counterpart_id": "6" },
    "11": { "id": "11", "title": "another project", "participant_ids": ["2", "8"], "primary_counterpart_id": null }
  },
  "users": {
    "2": { "id": "2", "full_name": "bob" },
    "6": { "id": "6", "full_name": "chaz" },
    "8": { "id": "8", "full_name": "jane" }
  }
}"#;

/// Specification matching [`RESPONSE`].
pub const SPECIFICATION: &str = r#"{
  "workspaces": {
    "associations": {
      "participants": { "foreign_key": "participant_ids", "collection": "users" },
      "primary_counterpart": { "foreign_key": "primary_counterpart_id", "collection": "users" }
    }
  },
  "users": null
}"#;

/// Write the response and specification fixtures into `dir`.
pub fn write_fixtures(dir: &Path) -> (PathBuf, PathBuf) {
    let response = dir.join("response.json");
    let spec = dir.join("spec.json");
    std::fs::write(&response, RESPONSE).expect("Failed to write response fixture");
    std::fs::write(&spec, SPECIFICATION).expect("Failed to write specification fixture");
    (response, spec)
}

/// Run the CLI binary with arguments.
pub fn run_cli(args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_brainstem"));
    cmd.args(args);
    cmd.env_remove("BRAINSTEM_SPEC");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI with `BRAINSTEM_SPEC` pointing at a specification file.
pub fn run_cli_with_env(args: &[&str], spec: &Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_brainstem"));
    cmd.args(args);
    cmd.env("BRAINSTEM_SPEC", spec);
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI with `input` piped to stdin.
pub fn run_cli_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_brainstem"))
        .args(args)
        .env_remove("BRAINSTEM_SPEC")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI");

    child
        .stdin
        .take()
        .expect("Failed to open stdin")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");

    child.wait_with_output().expect("Failed to wait for CLI")
}

/// Assert that a CLI run succeeded and return its stdout.
pub fn expect_success(output: Output, args: &[&str]) -> String {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect success.
pub fn run_cli_success(args: &[&str]) -> String {
    expect_success(run_cli(args), args)
}

/// Run the CLI and expect failure.
pub fn run_cli_failure(args: &[&str]) -> String {
    let output = run_cli(args);
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}
