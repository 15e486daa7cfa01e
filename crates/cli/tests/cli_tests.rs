//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("docsplit")
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

#[test]
fn test_cli_split_writes_sections() {
    let tmp = TempDir::new().unwrap();

    cmd()
        .args(["split", &get_fixture_path("docs_index.md"), "-o"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("rate-limiting-quotas.md"))
        .stderr(predicate::str::contains("Split into 4 sections"));

    for name in ["example-api-documentation.md", "authentication.md", "rate-limiting-quotas.md", "database.md"] {
        assert!(tmp.path().join(name).exists(), "missing {name}");
    }
    let auth = std::fs::read_to_string(tmp.path().join("authentication.md")).unwrap();
    assert!(auth.starts_with("# Authentication __"));
    assert!(auth.contains("## OAuth Flow"));
}

#[test]
fn test_cli_split_dry_run_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");

    cmd()
        .args(["split", "--dry-run", &get_fixture_path("docs_index.md"), "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("database.md"))
        .stderr(predicate::str::contains("Dry run"));

    assert!(!out.exists());
}

#[test]
fn test_cli_split_json() {
    let tmp = TempDir::new().unwrap();

    let output = cmd()
        .args(["split", "--json", &get_fixture_path("docs_index.md"), "-o"])
        .arg(tmp.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let sections = json["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 4);
    assert_eq!(sections[1]["title"], "Authentication");
    assert_eq!(sections[1]["file_name"], "authentication.md");
    assert_eq!(json["write"]["written"].as_array().unwrap().len(), 4);
    assert!(json["write"]["failed"].as_array().unwrap().is_empty());
}

#[test]
fn test_cli_split_stdin() {
    let tmp = TempDir::new().unwrap();
    let markdown = "Intro text\n# Install\nrun it\n# Usage\nuse it\n";

    cmd()
        .args(["split", "-", "-o"])
        .arg(tmp.path())
        .write_stdin(markdown)
        .assert()
        .success();

    let intro = std::fs::read_to_string(tmp.path().join("introduction.md")).unwrap();
    assert_eq!(intro, "# Introduction\n\nIntro text");
    let install = std::fs::read_to_string(tmp.path().join("install.md")).unwrap();
    assert_eq!(install, "# Install\nrun it");
    assert!(tmp.path().join("usage.md").exists());
}

#[test]
fn test_cli_split_keep_source_lines() {
    let tmp = TempDir::new().unwrap();

    cmd()
        .args(["split", "--keep-source-lines", &get_fixture_path("preamble.md"), "-o"])
        .arg(tmp.path())
        .assert()
        .success();

    let intro = std::fs::read_to_string(tmp.path().join("introduction.md")).unwrap();
    assert!(intro.contains("Source: https://example.com/developers"));
}

#[test]
fn test_cli_split_missing_file() {
    cmd()
        .args(["split", "does-not-exist.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.md"));
}

#[test]
fn test_cli_error_reported_once() {
    let output = cmd().args(["split", "does-not-exist.md"]).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Failed to split file").count(), 1);
    assert!(!stderr.contains("Error:"));
}

#[test]
fn test_cli_links_from_file() {
    cmd()
        .args([
            "links",
            &get_fixture_path("docs_page.html"),
            "--base",
            "https://example.com/developers",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://example.com/developers/changelog"))
        .stdout(predicate::str::contains("#authentication").not());
}

#[test]
fn test_cli_links_json() {
    let output = cmd()
        .args([
            "links",
            "--json",
            &get_fixture_path("docs_page.html"),
            "--base",
            "https://example.com/developers",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let links = json.as_array().unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0]["url"], "https://example.com/developers");
}

#[test]
fn test_cli_links_file_requires_base() {
    cmd()
        .args(["links", &get_fixture_path("docs_page.html")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--base"));
}

#[test]
fn test_cli_scrape_rejects_non_http_url() {
    let tmp = TempDir::new().unwrap();

    cmd()
        .args(["scrape", "ftp://example.com/docs", "--attempts", "1", "-o"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to fetch"));
}

#[test]
fn test_cli_completions() {
    cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("docsplit"));
}

#[test]
fn test_cli_verbose_banner() {
    cmd()
        .args(["-v", "split", "--dry-run", &get_fixture_path("no_headings.md")])
        .assert()
        .success()
        .stderr(predicate::str::contains("docsplit"))
        .stderr(predicate::str::contains("Debug logging enabled"));
}

#[test]
fn test_cli_no_subcommand() {
    cmd().assert().failure();
}
