use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

fn ytsent_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("ytsent");
    path
}

/// Temp dir with a config file; the returned path is the config.
fn setup_test_env(source_extra: &str, output_extra: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_content = format!(
        r#"[source]
api_key_env = "YTSENT_TEST_API_KEY"
timeout_secs = 5
{}

[output]
dir = "{}/out"
{}
"#,
        source_extra,
        root.display(),
        output_extra
    );

    let config_path = root.join("ytsent.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_ytsent(config_path: &Path, args: &[&str], api_key: Option<&str>) -> (String, String, bool) {
    let binary = ytsent_binary();
    let mut cmd = Command::new(&binary);
    cmd.arg("--config")
        .arg(config_path.to_str().unwrap())
        .arg("--progress")
        .arg("off")
        .args(args)
        .current_dir(config_path.parent().unwrap())
        .env_remove("YTSENT_TEST_API_KEY")
        .env_remove("RUST_LOG");
    if let Some(key) = api_key {
        cmd.env("YTSENT_TEST_API_KEY", key);
    }
    let output = cmd
        .output()
        .unwrap_or_else(|e| panic!("Failed to run ytsent binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_id_accepts_all_forms() {
    let (_tmp, config_path) = setup_test_env("", "");

    for url in [
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42",
        "https://youtu.be/dQw4w9WgXcQ",
        "https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1",
    ] {
        let (stdout, stderr, success) = run_ytsent(&config_path, &["id", url], None);
        assert!(success, "id failed for {}: {}", url, stderr);
        assert_eq!(stdout.trim(), "dQw4w9WgXcQ");
    }
}

#[test]
fn test_id_rejects_invalid_url() {
    let (_tmp, config_path) = setup_test_env("", "");

    let (_, stderr, success) = run_ytsent(&config_path, &["id", "not a video"], None);
    assert!(!success);
    assert!(
        stderr.contains("Please enter a correct link"),
        "unexpected stderr: {}",
        stderr
    );
}

#[test]
fn test_clean_prints_normalized_text() {
    let (_tmp, config_path) = setup_test_env("", "");

    let (stdout, _, success) = run_ytsent(&config_path, &["clean", "It's okay I guess."], None);
    assert!(success);
    assert_eq!(stdout.trim(), "okay guess");
}

#[test]
fn test_score_human_and_json() {
    let (_tmp, config_path) = setup_test_env("", "");

    let (stdout, stderr, success) = run_ytsent(&config_path, &["score", "I love this!"], None);
    assert!(success, "score failed: {}", stderr);
    assert!(stdout.contains("label:       Positive"));
    assert!(stdout.contains("lexicon:"));

    let (stdout, _, success) = run_ytsent(
        &config_path,
        &["score", "This is terrible.", "--json", "--policy", "statistical"],
        None,
    );
    assert!(success);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["label"], "Negative");
    assert_eq!(value["policy"], "statistical");
    assert!(value.get("lexicon").is_none());
}

#[test]
fn test_analyze_without_key_is_authentication_error() {
    let (tmp, config_path) = setup_test_env("", "");

    let (_, stderr, success) = run_ytsent(
        &config_path,
        &["analyze", "https://youtu.be/dQw4w9WgXcQ"],
        None,
    );
    assert!(!success);
    assert!(stderr.contains("authentication"), "stderr: {}", stderr);
    assert!(!tmp.path().join("out").exists());
}

#[test]
fn test_invalid_config_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("ytsent.toml");
    fs::write(&config_path, "[source]\npage_size = 500\n").unwrap();

    let (_, stderr, success) = run_ytsent(&config_path, &["score", "fine"], None);
    assert!(!success);
    assert!(stderr.contains("page_size"), "stderr: {}", stderr);
}

#[test]
fn test_completions() {
    let (_tmp, config_path) = setup_test_env("", "");

    let (stdout, _, success) = run_ytsent(&config_path, &["completions", "bash"], None);
    assert!(success);
    assert!(stdout.contains("ytsent"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_analyze_against_mock_api() {
    let app = Router::new().route(
        "/commentThreads",
        get(|| async {
            Json(json!({
                "items": [
                    { "snippet": { "topLevelComment": { "snippet": { "textDisplay": "I love this!" } } } },
                    { "snippet": { "topLevelComment": { "snippet": { "textDisplay": "This is terrible." } } } },
                    { "snippet": { "topLevelComment": { "snippet": { "textDisplay": "It's okay I guess." } } } }
                ]
            }))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let (tmp, config_path) = setup_test_env(
        &format!("base_url = \"http://{}\"", addr),
        "include_score = true",
    );

    let (stdout, stderr, success) = tokio::task::spawn_blocking(move || {
        run_ytsent(
            &config_path,
            &["analyze", "https://youtu.be/dQw4w9WgXcQ", "--json"],
            Some("test-key"),
        )
    })
    .await
    .unwrap();
    assert!(success, "analyze failed: stdout={}, stderr={}", stdout, stderr);

    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["video"], "dQw4w9WgXcQ");
    assert_eq!(report["comments"], 3);
    assert_eq!(report["counts"]["Positive"], 1);
    assert_eq!(report["counts"]["Negative"], 1);
    assert_eq!(report["counts"]["Neutral"], 1);

    let csv_path = tmp.path().join("out").join("comments_sentiment.csv");
    let csv = fs::read_to_string(csv_path).unwrap();
    assert!(csv.starts_with("Comment,Sentiment,Score\n"));
    assert_eq!(csv.lines().count(), 4);
    assert!(tmp.path().join("out").join("pie_chart.svg").exists());
    assert!(tmp.path().join("out").join("bar_chart.svg").exists());
}
