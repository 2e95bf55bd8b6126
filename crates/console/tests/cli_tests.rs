// Integration tests for the thecloud binary.
// Run with: cargo test -p thecloud-console --test cli_tests

use std::path::Path;
use std::process::Command;

use httpmock::prelude::*;

/// Build a command with credentials isolated to a per-test home.
fn thecloud(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_thecloud"));
    cmd.env("HOME", home);
    cmd.env("XDG_CONFIG_HOME", home.join(".config"));
    // Clear env to avoid leaking a real key or URL into tests
    cmd.env_remove("THECLOUD_API_KEY");
    cmd.env_remove("THECLOUD_API_URL");
    cmd
}

fn login(home: &Path, key: &str) {
    let output = thecloud(home)
        .args(["login", key])
        .output()
        .expect("failed to run thecloud");
    assert!(
        output.status.success(),
        "login failed: {}",
        String::from_utf8_lossy(&output.stderr),
    );
}

#[test]
fn missing_key_exits_40() {
    let home = tempfile::tempdir().unwrap();
    let output = thecloud(home.path())
        .args(["instances"])
        .output()
        .expect("failed to run thecloud");

    assert_eq!(
        output.status.code(),
        Some(40),
        "expected exit 40, got {:?}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr),
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("API key required"), "stderr: {}", stderr);
    assert!(stderr.contains("thecloud login"), "stderr: {}", stderr);
}

#[test]
fn login_then_instances_renders_table() {
    let home = tempfile::tempdir().unwrap();
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/instances")
            .header("X-API-Key", "thecloud_testkey");
        then.status(200).json_body(serde_json::json!({
            "data": [{
                "id": "0d9a7e3c-1111-2222-3333-444455556666",
                "name": "web-1",
                "image": "nginx:latest",
                "status": "RUNNING",
                "ports": "8080:80",
                "created_at": "2025-11-03T10:00:00Z"
            }]
        }));
    });

    login(home.path(), "thecloud_testkey");

    let output = thecloud(home.path())
        .env("THECLOUD_API_URL", server.base_url())
        .args(["instances"])
        .output()
        .expect("failed to run thecloud");

    mock.assert();
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("web-1"), "stdout: {}", stdout);
    assert!(stdout.contains("0d9a7e3c"), "stdout: {}", stdout);
    assert!(!stdout.contains("0d9a7e3c-1111"), "IDs must be shortened");
    assert!(stdout.contains("running"), "stdout: {}", stdout);
}

#[test]
fn forbidden_surfaces_envelope_message_and_exits_42() {
    let home = tempfile::tempdir().unwrap();
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/events");
        then.status(403)
            .json_body(serde_json::json!({ "error": { "message": "forbidden" } }));
    });

    login(home.path(), "bad-key");

    let output = thecloud(home.path())
        .env("THECLOUD_API_URL", server.base_url())
        .args(["events"])
        .output()
        .expect("failed to run thecloud");

    assert_eq!(output.status.code(), Some(42));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("forbidden"), "stderr: {}", stderr);
}

#[test]
fn blank_bucket_is_a_usage_error() {
    let home = tempfile::tempdir().unwrap();
    login(home.path(), "thecloud_testkey");

    let output = thecloud(home.path())
        .args(["storage", "   "])
        .output()
        .expect("failed to run thecloud");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Bucket name is required"), "stderr: {}", stderr);
}

#[test]
fn logout_clears_the_stored_key() {
    let home = tempfile::tempdir().unwrap();
    login(home.path(), "thecloud_testkey");

    let output = thecloud(home.path())
        .args(["logout"])
        .output()
        .expect("failed to run thecloud");
    assert_eq!(output.status.code(), Some(0));

    let output = thecloud(home.path())
        .args(["instances"])
        .output()
        .expect("failed to run thecloud");
    assert_eq!(output.status.code(), Some(40));
}

#[test]
fn login_without_key_or_tty_exits_2() {
    let home = tempfile::tempdir().unwrap();
    let output = thecloud(home.path())
        .args(["login"])
        .stdin(std::process::Stdio::piped())
        .output()
        .expect("failed to run thecloud");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("THECLOUD_API_KEY"), "stderr: {}", stderr);
}

#[test]
fn json_flag_emits_raw_records() {
    let home = tempfile::tempdir().unwrap();
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/vpcs");
        then.status(200).json_body(serde_json::json!({
            "data": [{
                "id": "vpc-1",
                "name": "prod",
                "network_id": "net-42",
                "created_at": "2025-11-03T10:00:00Z"
            }]
        }));
    });

    login(home.path(), "thecloud_testkey");

    let output = thecloud(home.path())
        .env("THECLOUD_API_URL", server.base_url())
        .args(["vpcs", "--json"])
        .output()
        .expect("failed to run thecloud");

    assert_eq!(output.status.code(), Some(0));
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(parsed[0]["id"].as_str(), Some("vpc-1"));
    assert_eq!(parsed[0]["network_id"].as_str(), Some("net-42"));
}

#[test]
fn stats_prints_summary_and_recent_activity() {
    let home = tempfile::tempdir().unwrap();
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/dashboard/stats");
        then.status(200).json_body(serde_json::json!({
            "data": {
                "summary": {
                    "total_instances": 5,
                    "running_instances": 3,
                    "stopped_instances": 2,
                    "total_volumes": 4,
                    "attached_volumes": 2,
                    "total_vpcs": 2,
                    "total_storage_mb": 4096
                },
                "recent_events": [{
                    "id": "ev-1",
                    "action": "instance.launch",
                    "resource_id": "0d9a7e3c-9999",
                    "resource_type": "instance",
                    "user_id": "u-1",
                    "created_at": "2025-11-03T10:00:00Z"
                }]
            }
        }));
    });

    login(home.path(), "thecloud_testkey");

    let output = thecloud(home.path())
        .env("THECLOUD_API_URL", server.base_url())
        .args(["stats"])
        .output()
        .expect("failed to run thecloud");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("3 running / 5 total"), "stdout: {}", stdout);
    assert!(stdout.contains("60.0% running"), "stdout: {}", stdout);
    assert!(stdout.contains("4.0 GB provisioned"), "stdout: {}", stdout);
    assert!(stdout.contains("instance.launch"), "stdout: {}", stdout);
    assert!(stdout.contains("instance 0d9a7e3c"), "stdout: {}", stdout);
}

#[test]
fn storage_lists_bucket_objects() {
    let home = tempfile::tempdir().unwrap();
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET).path("/storage/backups");
        then.status(200).json_body(serde_json::json!({
            "data": [{
                "id": "obj-1",
                "bucket": "backups",
                "key": "db/nightly.tar.gz",
                "size_bytes": 2097152,
                "content_type": "application/gzip",
                "created_at": "2025-11-03T10:00:00Z"
            }]
        }));
    });

    login(home.path(), "thecloud_testkey");

    let output = thecloud(home.path())
        .env("THECLOUD_API_URL", server.base_url())
        .args(["storage", "backups"])
        .output()
        .expect("failed to run thecloud");

    mock.assert();
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("db/nightly.tar.gz"), "stdout: {}", stdout);
    assert!(stdout.contains("2.0 MB"), "stdout: {}", stdout);
}
