//! End-to-end tests for the pipeforge binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PUSH_TO_VERCEL: &str = r#"{
  "nodes": [
    {"id": "t1", "role": "trigger", "blockType": "trigger_push", "label": "Push",
     "configuration": {"trigger": "push", "branch": "main"}},
    {"id": "j1", "role": "job", "blockType": "node_test", "label": "Test",
     "configuration": {"nodeVersion": "20", "checkout": true}},
    {"id": "j2", "role": "job", "blockType": "deploy_vercel", "label": "Ship",
     "configuration": {"checkout": true}}
  ],
  "edges": [
    {"source": "t1", "target": "j1"},
    {"source": "j1", "target": "j2"}
  ]
}"#;

const CYCLE: &str = r#"{
  "nodes": [
    {"id": "a", "role": "job", "blockType": "lint", "label": "Lint"},
    {"id": "b", "role": "job", "blockType": "security_scan", "label": "Scan"}
  ],
  "edges": [
    {"source": "a", "target": "b"},
    {"source": "b", "target": "a"}
  ]
}"#;

fn create_test_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("pipeforge_test_")
        .tempdir()
        .unwrap()
}

fn write_graph(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join("graph.json");
    fs::write(&path, text).unwrap();
    path
}

fn pipeforge(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("pipeforge").unwrap();
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("PIPEFORGE_CONFIG")
        .env_remove("PIPEFORGE_REPOSITORY")
        .env_remove("GITHUB_TOKEN");
    cmd
}

#[test]
fn test_generate_github_to_stdout() {
    let dir = create_test_dir();
    let graph = write_graph(dir.path(), PUSH_TO_VERCEL);

    pipeforge(dir.path())
        .arg("generate")
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "name: Push\n\non:\n  push:\n    branches: [\"main\"]\n\njobs:\n",
        ))
        .stdout(predicate::str::contains("    needs: [test]\n"))
        .stdout(predicate::str::ends_with("\n"));
}

#[test]
fn test_generate_gitlab_to_stdout() {
    let dir = create_test_dir();
    let graph = write_graph(dir.path(), PUSH_TO_VERCEL);

    pipeforge(dir.path())
        .args(["generate", "--format", "gitlab"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# GitLab CI Pipeline\n"))
        .stdout(predicate::str::contains("stages:\n  - test\n  - deploy\n"));
}

#[test]
fn test_generate_write_uses_conventional_path() {
    let dir = create_test_dir();
    let graph = write_graph(dir.path(), PUSH_TO_VERCEL);

    pipeforge(dir.path())
        .args(["generate", "--write"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote .github/workflows/ci.yml"));

    let written = fs::read_to_string(dir.path().join(".github/workflows/ci.yml")).unwrap();
    assert!(written.starts_with("name: Push\n"));
}

#[test]
fn test_generate_output_flag() {
    let dir = create_test_dir();
    let graph = write_graph(dir.path(), PUSH_TO_VERCEL);
    let target = dir.path().join("out/pipeline.yml");

    pipeforge(dir.path())
        .args(["generate", "-f", "gitlab", "--output"])
        .arg(&target)
        .arg(&graph)
        .assert()
        .success();

    assert!(fs::read_to_string(target).unwrap().contains("ship:\n  stage: deploy\n"));
}

#[test]
fn test_settings_override_output_path() {
    let dir = create_test_dir();
    let graph = write_graph(dir.path(), PUSH_TO_VERCEL);
    fs::write(
        dir.path().join("pipeforge.toml"),
        "[output]\ngitlab = \"ci/main.yml\"\n",
    )
    .unwrap();

    pipeforge(dir.path())
        .args(["generate", "-f", "gitlab", "--write"])
        .arg(&graph)
        .assert()
        .success();

    assert!(dir.path().join("ci/main.yml").is_file());
}

#[test]
fn test_settings_log_filter() {
    let dir = create_test_dir();
    let graph = write_graph(dir.path(), PUSH_TO_VERCEL);
    fs::write(
        dir.path().join("pipeforge.toml"),
        "[log]\nfilter = \"pipeforge_gitlab=debug\"\n",
    )
    .unwrap();

    pipeforge(dir.path())
        .args(["generate", "-f", "gitlab"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("stages:"));
}

#[test]
fn test_invalid_log_filter_fails() {
    let dir = create_test_dir();
    let graph = write_graph(dir.path(), PUSH_TO_VERCEL);
    fs::write(
        dir.path().join("pipeforge.toml"),
        "[log]\nfilter = \"pipeforge=[\"\n",
    )
    .unwrap();

    pipeforge(dir.path())
        .args(["generate", "-f", "github"])
        .arg(&graph)
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Failed to create tracing filter"));
}

#[test]
fn test_generate_missing_graph_fails() {
    let dir = create_test_dir();

    pipeforge(dir.path())
        .args(["generate", "missing.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to read missing.json"));
}

#[test]
fn test_generate_malformed_graph_fails() {
    let dir = create_test_dir();
    let graph = write_graph(dir.path(), r#"{"nodes": 3}"#);

    pipeforge(dir.path())
        .arg("generate")
        .arg(&graph)
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_unknown_format_rejected() {
    let dir = create_test_dir();
    let graph = write_graph(dir.path(), PUSH_TO_VERCEL);

    pipeforge(dir.path())
        .args(["generate", "-f", "jenkins"])
        .arg(&graph)
        .assert()
        .failure();
}

#[test]
fn test_check_reports_cycle() {
    let dir = create_test_dir();
    let graph = write_graph(dir.path(), CYCLE);

    pipeforge(dir.path())
        .arg("check")
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("cycle"));

    pipeforge(dir.path())
        .args(["check", "--strict"])
        .arg(&graph)
        .assert()
        .code(1);
}

#[test]
fn test_check_clean_graph() {
    let dir = create_test_dir();
    let graph = write_graph(dir.path(), PUSH_TO_VERCEL);

    pipeforge(dir.path())
        .args(["check", "--strict"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("no problems found"));
}

#[test]
fn test_cycle_still_generates() {
    let dir = create_test_dir();
    let graph = write_graph(dir.path(), CYCLE);

    pipeforge(dir.path())
        .arg("generate")
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("needs: [scan]"))
        .stdout(predicate::str::contains("needs: [lint]"));
}

#[test]
fn test_blocks_listing() {
    let dir = create_test_dir();

    pipeforge(dir.path())
        .arg("blocks")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Triggers\n"))
        .stdout(predicate::str::contains("deploy_vercel"));

    pipeforge(dir.path())
        .args(["blocks", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"blockType\": \"notify_slack\""));
}

#[test]
fn test_template_round_trips_through_generate() {
    let dir = create_test_dir();

    let output = pipeforge(dir.path())
        .args(["template", "fullstack"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let graph = dir.path().join("fullstack.json");
    fs::write(&graph, &output.stdout).unwrap();

    let expected = pipeforge(dir.path())
        .args(["template", "fullstack", "-f", "github"])
        .output()
        .unwrap();

    pipeforge(dir.path())
        .arg("generate")
        .arg(&graph)
        .assert()
        .success()
        .stdout(String::from_utf8(expected.stdout).unwrap());
}

#[test]
fn test_unknown_template() {
    let dir = create_test_dir();

    pipeforge(dir.path())
        .args(["template", "rust"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown template"));
}

#[test]
fn test_formats_listing() {
    let dir = create_test_dir();

    pipeforge(dir.path())
        .arg("formats")
        .assert()
        .success()
        .stdout(predicate::str::contains(".gitlab-ci.yml"));
}

#[test]
fn test_push_dry_run() {
    let dir = create_test_dir();
    let graph = write_graph(dir.path(), PUSH_TO_VERCEL);

    pipeforge(dir.path())
        .args(["push", "--repo", "acme/web", "--dry-run"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("Would write .github/workflows/ci.yml to acme/web"))
        .stdout(predicate::str::contains(
            "https://github.com/acme/web/blob/HEAD/.github/workflows/ci.yml",
        ));
}

#[test]
fn test_push_repository_from_env() {
    let dir = create_test_dir();
    let graph = write_graph(dir.path(), PUSH_TO_VERCEL);

    pipeforge(dir.path())
        .env("PIPEFORGE_REPOSITORY", "acme/api")
        .args(["push", "--dry-run", "-f", "gitlab"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("Would write .gitlab-ci.yml to acme/api"));
}

#[test]
fn test_push_without_token_fails() {
    let dir = create_test_dir();
    let graph = write_graph(dir.path(), PUSH_TO_VERCEL);

    pipeforge(dir.path())
        .args(["push", "--repo", "acme/web"])
        .arg(&graph)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("GITHUB_TOKEN"));
}

#[test]
fn test_push_invalid_repository() {
    let dir = create_test_dir();
    let graph = write_graph(dir.path(), PUSH_TO_VERCEL);

    pipeforge(dir.path())
        .args(["push", "--repo", "acme", "--dry-run"])
        .arg(&graph)
        .assert()
        .code(2);
}
