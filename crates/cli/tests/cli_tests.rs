//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("gleaner")
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

#[test]
fn test_cli_file_input() {
    cmd().arg(get_fixture_path("news_article.html")).assert().success();
}

#[test]
fn test_cli_stdin_input() {
    let html = std::fs::read_to_string(get_fixture_path("news_article.html")).unwrap();
    cmd()
        .args(["-f", "text", "-"])
        .write_stdin(html)
        .assert()
        .success()
        .stdout(predicate::str::contains("Harbor Avenue"));
}

#[test]
fn test_cli_json_format() {
    let output = cmd().arg(get_fixture_path("news_article.html")).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["plan"], "readability");
    assert_eq!(json["byline"], "Maria Okafor");
    assert!(json["textContent"].as_str().unwrap().contains("Harbor Avenue"));
}

#[test]
fn test_cli_html_format() {
    cmd()
        .args(["-f", "html", &get_fixture_path("news_article.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("<p"))
        .stdout(predicate::str::contains("window.analytics").not());
}

#[test]
fn test_cli_text_format() {
    cmd()
        .args(["-f", "text", &get_fixture_path("news_article.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("industrial district"))
        .stdout(predicate::str::contains("<p").not());
}

#[test]
fn test_cli_invalid_format() {
    cmd()
        .args(["-f", "markdown", &get_fixture_path("news_article.html")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format"));
}

#[test]
fn test_cli_output_file() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("output.json");

    cmd()
        .args(["-o", output.to_str().unwrap()])
        .arg(get_fixture_path("news_article.html"))
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("\"plan\": \"readability\""));
}

#[test]
fn test_cli_metadata() {
    let output = cmd().args(["-m", &get_fixture_path("news_article.html")]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["source"], "schemaorg");
    assert_eq!(json["confidence"], 95);
    assert_eq!(json["paywalledIndicators"], serde_json::json!(["subscribe", "premium content"]));
}

#[test]
fn test_cli_metadata_with_url() {
    cmd()
        .args(["-m", "--url", "https://www.garden.example/notes/spring", &get_fixture_path("generic_page.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"source\": \"generic\""))
        .stdout(predicate::str::contains("https://www.garden.example/content/garden.jpg"));
}

#[test]
fn test_cli_invalid_file() {
    cmd()
        .arg("nonexistent.html")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_cli_nav_only_uses_fallback() {
    cmd()
        .arg(get_fixture_path("nav_only.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"plan\": \"fallback\""));
}

#[test]
fn test_cli_malformed_html() {
    cmd().arg(get_fixture_path("malformed.html")).assert().success();
}

#[test]
fn test_cli_empty_stdin() {
    cmd()
        .args(["-f", "json", "-"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"length\": 0"));
}

#[test]
fn test_cli_title_falls_back_to_file_name() {
    cmd()
        .arg(get_fixture_path("nav_only.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"nav only\""));
}

#[test]
fn test_cli_verbose() {
    cmd()
        .args(["-v", &get_fixture_path("news_article.html")])
        .assert()
        .success()
        .stderr(predicate::str::contains("Gleaner"))
        .stderr(predicate::str::contains("Extraction Details"));
}

#[test]
fn test_cli_tuning_flags() {
    cmd()
        .args([
            "--char-threshold",
            "100",
            "--readability-timeout",
            "5",
            "--no-images",
            &get_fixture_path("news_article.html"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("<img").not());
}

#[test]
fn test_cli_completions() {
    cmd()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gleaner"));
}

#[test]
fn test_cli_requires_input() {
    cmd().assert().failure();
}
