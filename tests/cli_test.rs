// tests/cli_test.rs
mod common;

use common::TestRepo;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn git_bump(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_git-bump"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn git_bump_in(repo: &TestRepo, command: &str, extra: &[&str]) -> Output {
    let config = fixture("config.toml");
    let mut args = vec!["--config", config.to_str().unwrap()];
    args.extend_from_slice(extra);
    args.push(command);
    args.push(repo.path().to_str().unwrap());
    git_bump(&args)
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

fn released_repo() -> TestRepo {
    let mut repo = TestRepo::new();
    let first = repo.commit("feature(core): initial");
    repo.tag("v1.2.3", first);
    repo
}

#[test]
fn test_git_bump_help() {
    let output = git_bump(&["--help"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("git-bump"));
    assert!(stdout.contains("next"));
    assert!(stdout.contains("changelog"));
}

#[test]
fn test_git_bump_version() {
    let output = git_bump(&["--version"]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim(),
        format!("git-bump {}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn test_latest() {
    let mut repo = released_repo();
    repo.commit("fix(ui): colour");

    let output = git_bump(&["latest", repo.path().to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "v1.2.3\n");
}

#[test]
fn test_next_and_change() {
    let mut repo = released_repo();
    repo.commit("fix(ui): colour");
    repo.commit("feature(api): users");
    repo.commit("Merge branch 'topic'");

    let output = git_bump_in(&repo, "next", &[]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "v1.3.0\n");
    assert!(stderr(&output).contains("Ignored 1 commit"));

    let output = git_bump_in(&repo, "change", &[]);
    assert_eq!(stdout(&output), "minor\n");
}

#[test]
fn test_next_pre_release() {
    let mut repo = released_repo();
    repo.commit("fix(ui): colour");

    let output = git_bump_in(&repo, "next", &["--pre", "beta"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "v1.2.4-beta.1\n");
}

#[test]
fn test_commits() {
    let mut repo = released_repo();
    repo.commit("fix(ui): colour");
    repo.commit("docs(readme): typo");

    let output = git_bump(&["commits", repo.path().to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "docs(readme): typo\nfix(ui): colour\n");
}

#[test]
fn test_commits_summary() {
    let mut repo = released_repo();
    repo.commit("fix(ui): colour\n\nlong body");
    repo.commit("docs(readme): typo");

    let output = git_bump(&["commits", "--summary", repo.path().to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("2 commits since 'v1.2.3'"));
    assert!(stdout.contains("1. docs(readme): typo"));
    assert!(stdout.contains("2. fix(ui): colour"));
    assert!(!stdout.contains("long body"));
}

#[test]
fn test_verify() {
    let mut repo = released_repo();
    repo.commit("fix(ui): colour");

    let output = git_bump_in(&repo, "verify", &[]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).is_empty());

    repo.commit("wip");
    let output = git_bump_in(&repo, "verify", &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("missing required message parameter"));
}

#[test]
fn test_changelog() {
    let mut repo = released_repo();
    repo.commit("fix(ui): colour");
    repo.commit("feature(api): users");

    let output = git_bump_in(&repo, "changelog", &[]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let changelog = stdout(&output);
    assert!(changelog.contains("## feature\n- users\n"));
    assert!(changelog.contains("## fix\n- colour\n"));
}

#[test]
fn test_tag() {
    let mut repo = released_repo();
    let head = repo.commit("breaking(core): new api");

    let output = git_bump_in(&repo, "tag", &[]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("v2.0.0"));
    assert_eq!(repo.tags_on(head), vec!["v2.0.0"]);

    let output = git_bump_in(&repo, "tag", &[]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("unchanged"));
    assert_eq!(repo.tags_on(head), vec!["v2.0.0"]);
}

#[test]
fn test_no_tags_fails() {
    let mut repo = TestRepo::new();
    repo.commit("fix(ui): colour");

    let output = git_bump_in(&repo, "next", &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no tag found"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_missing_config_fails() {
    let repo = released_repo();
    let output = git_bump(&[
        "--config",
        "does/not/exist.toml",
        "next",
        repo.path().to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ERROR:"));
}
