//! Integration tests for the presence-plan binary startup contract.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(home: &Path, api_key: Option<&str>, args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_presence-plan");
    let mut command = Command::new(bin);
    command
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env_remove("PRESENCE_LOG")
        .env_remove("API_KEY")
        .args(args);
    if let Some(key) = api_key {
        command.env("API_KEY", key);
    }
    command.output().unwrap()
}

#[test]
fn test_refuses_to_start_without_credential() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(temp_dir.path(), None, &["schema"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("API_KEY"),
        "diagnostic should name the credential: {}",
        stderr
    );
    assert!(output.stdout.is_empty());
}

#[test]
fn test_blank_credential_is_treated_as_missing() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(temp_dir.path(), Some("   "), &["schema"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("API_KEY"));
}

#[test]
fn test_schema_command_prints_descriptor() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(temp_dir.path(), Some("test-key"), &["--log-level", "off", "schema"]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let schema: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(schema["type"], "OBJECT");
    assert_eq!(schema["properties"]["socialMediaPlan"]["items"]["type"], "OBJECT");
}

#[test]
fn test_prompt_command_is_deterministic() {
    let temp_dir = TempDir::new().unwrap();
    let args = [
        "--log-level",
        "off",
        "prompt",
        "--name",
        "Artisan Coffee Roasters",
        "--industry",
        "Specialty Coffee & Cafe",
        "--audience",
        "Young professionals, students, remote workers",
        "--goals",
        "Increase online sales, build community",
    ];

    let first = run(temp_dir.path(), Some("test-key"), &args);
    let second = run(temp_dir.path(), Some("test-key"), &args);

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    let prompt = String::from_utf8_lossy(&first.stdout);
    assert!(prompt.contains("Business Name: Artisan Coffee Roasters"));
}

#[test]
fn test_missing_config_file_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.toml");
    let output = run(
        temp_dir.path(),
        Some("test-key"),
        &["--config", missing.to_str().unwrap(), "schema"],
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nope.toml"));
}
