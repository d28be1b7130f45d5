//! Integration tests for the offline CLI commands.

use serde_json::{json, Value};
use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::TempDir;

const REPO: &str = "did:plc:oisofpd7lj26yvgiivf3lxsi";

fn atscope() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_atscope"));
    command.env_remove("ATSCOPE_CONFIG").env("RUST_LOG", "off");
    command
}

fn run_cli(args: &[&str]) -> (bool, String, String) {
    let output = atscope().args(args).output().expect("Failed to execute CLI");

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    (output.status.success(), stdout, stderr)
}

fn write_record(dir: &TempDir, value: &Value) -> String {
    let path = dir.path().join("record.json");
    std::fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn test_normalize_post_url() {
    let (success, stdout, _) = run_cli(&[
        "normalize",
        "https://bsky.app/profile/alice.bsky.social/post/3l2zpbbhuvw2h",
    ]);
    assert!(success);
    assert!(stdout.contains("at://alice.bsky.social/app.bsky.feed.post/3l2zpbbhuvw2h"));
    assert!(stdout.contains("/at/alice.bsky.social/app.bsky.feed.post/3l2zpbbhuvw2h"));
}

#[test]
fn test_normalize_json_output() {
    let (success, stdout, _) = run_cli(&["normalize", "--json", REPO]);
    assert!(success);

    let parsed: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["kind"], "record");
    assert_eq!(parsed["authority"]["kind"], "did");
    assert_eq!(parsed["authority"]["value"], REPO);
    assert!(parsed.get("collection").is_none());
}

#[test]
fn test_normalize_endpoint() {
    let (success, stdout, _) = run_cli(&["normalize", "https://pds.example.com/xrpc/_health"]);
    assert!(success);
    assert!(stdout.contains("https://pds.example.com"));
    assert!(stdout.contains("/pds.example.com"));
}

#[test]
fn test_normalize_rejects_empty_input() {
    let (success, _, stderr) = run_cli(&["normalize", "   "]);
    assert!(!success);
    assert!(stderr.contains("Error"));
}

#[test]
fn test_render_file_sorts_keys() {
    let dir = TempDir::new().unwrap();
    let path = write_record(&dir, &json!({"zeta": 1, "alpha": "hello world"}));

    let (success, stdout, _) = run_cli(&["render", &path, "--repo", REPO]);
    assert!(success);
    let alpha = stdout.find("alpha").unwrap();
    let zeta = stdout.find("zeta").unwrap();
    assert!(alpha < zeta);
    assert!(stdout.contains("hello world"));
}

#[test]
fn test_render_image_blob_json() {
    let dir = TempDir::new().unwrap();
    let path = write_record(
        &dir,
        &json!({
            "$type": "blob",
            "mimeType": "image/jpeg",
            "ref": { "$link": "bafkreiabc" },
            "size": 10
        }),
    );

    let (success, stdout, _) = run_cli(&["render", &path, "--repo", REPO, "--json"]);
    assert!(success);
    let parsed: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["type"], "mapping");
    assert_eq!(parsed["media"]["media"], "image");
    assert_eq!(
        parsed["media"]["thumbnail"],
        format!("https://cdn.bsky.app/img/feed_thumbnail/plain/{}/bafkreiabc@jpeg", REPO)
    );
}

#[test]
fn test_render_uses_configured_cdn() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("atscope.yaml");
    std::fs::write(&config, "cdn_base: https://cdn.example\n").unwrap();
    let path = write_record(
        &dir,
        &json!({
            "$type": "blob",
            "mimeType": "image/png",
            "ref": { "$link": "bafkreiabc" },
            "size": 10
        }),
    );

    let (success, stdout, _) = run_cli(&[
        "--config",
        config.to_str().unwrap(),
        "render",
        &path,
        "--repo",
        REPO,
    ]);
    assert!(success);
    assert!(stdout.contains("https://cdn.example/img/feed_thumbnail/plain/"));
}

#[test]
fn test_render_from_stdin() {
    let mut child = atscope()
        .args(["render", "--repo", REPO])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(format!(r#"{{"subject":"at://{}/app.bsky.feed.post/3k"}}"#, REPO).as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(&format!("-> /at/{}/app.bsky.feed.post/3k", REPO)));
}

#[test]
fn test_render_invalid_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{not json").unwrap();

    let (success, _, stderr) = run_cli(&["render", path.to_str().unwrap(), "--repo", REPO]);
    assert!(!success);
    assert!(stderr.contains("invalid JSON"));
}

#[test]
fn test_link_known_collection() {
    let (success, stdout, _) = run_cli(&["link", "at://alice/app.bsky.feed.post/3l2zpbbhuvw2h"]);
    assert!(success);
    assert_eq!(
        stdout.trim(),
        "Bluesky: https://bsky.app/profile/alice/post/3l2zpbbhuvw2h"
    );
}

#[test]
fn test_link_unlisted_collection() {
    let (success, stdout, stderr) = run_cli(&["link", "at://alice/com.example.thing/1"]);
    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("no external link"));
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.yaml");
    let (success, _, stderr) = run_cli(&[
        "--config",
        missing.to_str().unwrap(),
        "normalize",
        REPO,
    ]);
    assert!(!success);
    assert!(stderr.contains("failed to read"));
}

#[test]
fn test_render_respects_configured_depth() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("atscope.yaml");
    std::fs::write(&config, "max_depth: 1\n").unwrap();
    let path = write_record(&dir, &json!({"a": {"b": {"c": 1}}}));

    let (success, stdout, _) = run_cli(&[
        "--config",
        config.to_str().unwrap(),
        "render",
        &path,
        "--repo",
        REPO,
    ]);
    assert!(success);
    assert!(stdout.contains("(too deep)"));
    assert!(!stdout.contains("c:"));
}

#[test]
fn test_resolve_failure_shows_only_notice() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("atscope.yaml");
    std::fs::write(&config, "handle_resolver: http://127.0.0.1:1\n").unwrap();

    let (success, stdout, stderr) = run_cli(&[
        "--config",
        config.to_str().unwrap(),
        "resolve",
        "nobody.test",
    ]);
    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Could not resolve AT URI"));
    assert!(!stderr.contains("handle not found"));
    assert!(!stderr.contains("127.0.0.1"));
}

#[test]
fn test_record_rejects_malformed_pds() {
    let (success, stdout, stderr) = run_cli(&[
        "record",
        "--pds",
        "pds.example.com/xrpc",
        "at://alice.test/app.bsky.feed.post/3l2zpbbhuvw2h",
    ]);
    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("invalid endpoint URL 'pds.example.com/xrpc'"));
}
