// Integration tests for the compass-mcp binary's non-serving entry points

use assert_cmd::Command;
use predicates::prelude::*;

fn compass() -> Command {
    let mut cmd = Command::cargo_bin("compass-mcp").expect("binary is built");
    // Keep the developer's environment out of the assertions
    cmd.env_remove("GITEE_ACCESS_TOKEN")
        .env_remove("COMPASS_BASE_URL")
        .env_remove("COMPASS_TIMEOUT_SECS");
    cmd
}

#[test]
fn test_list_tools_prints_every_tool() {
    compass()
        .arg("--list-tools")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available tools:"))
        .stdout(predicate::str::contains("get_project_activity"))
        .stdout(predicate::str::contains("get_fork_enriched_data"))
        .stdout(predicate::str::contains("get_pull_requests"));
}

#[test]
fn test_list_categories() {
    compass()
        .arg("--list-categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("metric_model"))
        .stdout(predicate::str::contains("enriched_data"))
        .stdout(predicate::str::contains("pull_request"));
}

#[test]
fn test_list_toolsets() {
    compass()
        .arg("--list-toolsets")
        .assert()
        .success()
        .stdout(predicate::str::contains("enriched_data"));
}

#[test]
fn test_invalid_tool_name_aborts_startup() {
    compass()
        .args(["--tools", "get_project_activity,get_everything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid tool names specified"))
        .stderr(predicate::str::contains("get_everything"));
}

#[test]
fn test_call_without_token_prints_401_envelope() {
    // Unroutable base URL: the missing token must short-circuit before any I/O
    let output = compass()
        .args([
            "--base-url",
            "http://127.0.0.1:9",
            "call",
            "get_project_activity",
            "--label",
            "https://github.com/a/b",
            "--begin-date",
            "2023-01-01",
            "--end-date",
            "2023-12-31",
        ])
        .current_dir(std::env::temp_dir())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(
        String::from_utf8(output).expect("stdout is UTF-8"),
        "{\"status\": 401, \"error\": \"Access token not found in .env file.\"}\n"
    );
}
