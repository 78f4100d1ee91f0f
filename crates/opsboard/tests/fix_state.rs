//! Integration tests for the `fix` subcommand against a real state file.
//!
//! The state file location is overridden per-subprocess via
//! OPSBOARD_STATE_FILE, so tests never touch the user's home directory.

use std::process::Command;

fn run_fix(state_path: &std::path::Path) -> std::process::Output {
    let output = Command::new(env!("CARGO_BIN_EXE_opsboard"))
        .arg("fix")
        .env("OPSBOARD_STATE_FILE", state_path)
        .output()
        .expect("Failed to execute 'opsboard fix'");

    assert!(
        output.status.success(),
        "opsboard fix failed with exit code {:?}. stderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );

    output
}

#[test]
fn test_fix_rewrites_legacy_prefixes_once() {
    let dir = tempfile::TempDir::new().unwrap();
    let state_path = dir.path().join("state.json");
    std::fs::write(
        &state_path,
        r#"{
  "userAvatar": "/upload/me.png",
  "userInfo": "{\"avatar\":\"/upload/me.png\"}"
}"#,
    )
    .unwrap();

    let output = run_fix(&state_path);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Avatar URLs updated"), "got: {}", stdout);

    let state: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&state_path).unwrap()).unwrap();
    assert_eq!(state["userAvatar"], "/api/upload/me.png");
    let info: serde_json::Value =
        serde_json::from_str(state["userInfo"].as_str().unwrap()).unwrap();
    assert_eq!(info["avatar"], "/api/upload/me.png");

    // Second run is a no-op on already-fixed state.
    let output = run_fix(&state_path);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Client state already consistent"),
        "got: {}",
        stdout
    );
}

#[test]
fn test_fix_on_missing_state_file_reports_consistent() {
    let dir = tempfile::TempDir::new().unwrap();
    let state_path = dir.path().join("state.json");

    let output = run_fix(&state_path);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Client state already consistent"));
}
