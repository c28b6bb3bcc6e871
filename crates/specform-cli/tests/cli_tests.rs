//! CLI integration tests.

mod common;

use common::{TestContext, NO_PROMPT_SPEC, VALID_SPEC};
use predicates::prelude::*;

#[test]
fn test_compile_writes_artifact() {
    let ctx = TestContext::new();
    let spec = ctx.spec("summary.spec.md", VALID_SPEC);

    ctx.command()
        .args(["compile"])
        .arg(&spec)
        .assert()
        .success()
        .stdout(predicate::str::contains("summarize-a-technical-article"));

    let dir = ctx.path().join(".specform/prompts/summarize-a-technical-article");
    let artifacts: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
    assert_eq!(artifacts.len(), 1);

    let path = artifacts[0].as_ref().unwrap().path();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["title"], "Summarize a Technical Article!");
    assert_eq!(json["values"]["tone"], "casual");
    assert_eq!(json["assertions"][0]["type"], "contains");
    assert_eq!(json["assertions"][1]["value"], "/HTTP/i");
}

#[test]
fn test_compile_twice_is_unchanged() {
    let ctx = TestContext::new();
    let spec = ctx.spec("summary.spec.md", VALID_SPEC);

    ctx.command().arg("compile").arg(&spec).assert().success();
    ctx.command()
        .arg("compile")
        .arg(&spec)
        .assert()
        .success()
        .stdout(predicate::str::contains("(unchanged)"));
}

#[test]
fn test_compile_with_out_dir_and_config() {
    let ctx = TestContext::new().with_config("output_dir: from-config\npretty: false\n");
    let spec = ctx.spec("summary.spec.md", VALID_SPEC);

    ctx.command().arg("compile").arg(&spec).assert().success();
    assert!(ctx.path().join("from-config/summarize-a-technical-article").is_dir());

    ctx.command()
        .arg("compile")
        .arg(&spec)
        .args(["--out", "explicit"])
        .assert()
        .success();
    assert!(ctx.path().join("explicit/summarize-a-technical-article").is_dir());
}

#[test]
fn test_compile_failure_sets_exit_code() {
    let ctx = TestContext::new();
    let good = ctx.spec("good.spec.md", VALID_SPEC);
    let bad = ctx.spec("bad.spec.md", NO_PROMPT_SPEC);

    ctx.command()
        .arg("compile")
        .arg(&good)
        .arg(&bad)
        .assert()
        .code(5)
        .stdout(predicate::str::contains("no prompt found in spec file"))
        .stdout(predicate::str::contains("summarize-a-technical-article"));
}

#[test]
fn test_check_reports_diagnostics_without_writing() {
    let ctx = TestContext::new();
    let spec = ctx.spec(
        "lint.spec.md",
        "---\ntitle: Lint\n---\n```prompt\nHi {{name}}\n```\n```inputs\nunused\n```\n",
    );

    ctx.command()
        .arg("check")
        .arg(&spec)
        .assert()
        .success()
        .stdout(predicate::str::contains("lint-"))
        .stdout(predicate::str::contains("warning: placeholder `{{name}}` has no matching input"))
        .stdout(predicate::str::contains("info: input `unused` is never used in the prompt"));

    assert!(!ctx.path().join(".specform").exists());
}

#[test]
fn test_json_format() {
    let ctx = TestContext::new();
    let spec = ctx.spec("summary.spec.md", VALID_SPEC);

    let output = ctx
        .command()
        .args(["--format", "json", "check"])
        .arg(&spec)
        .output()
        .unwrap();
    assert!(output.status.success());

    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(reports[0]["status"], "checked");
    assert!(reports[0]["id"]
        .as_str()
        .unwrap()
        .starts_with("summarize-a-technical-article-"));
}

#[test]
fn test_invalid_config_exit_code() {
    let ctx = TestContext::new().with_config("pretty: [unclosed\n");
    let spec = ctx.spec("summary.spec.md", VALID_SPEC);

    ctx.command().arg("check").arg(&spec).assert().code(2);
}

#[test]
fn test_missing_file() {
    let ctx = TestContext::new();

    ctx.command()
        .args(["check", "does-not-exist.spec.md"])
        .assert()
        .code(5)
        .stdout(predicate::str::contains("failed to read spec file"));
}

#[test]
fn test_completions() {
    let ctx = TestContext::new();
    ctx.command()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("specform"));
}

#[test]
fn test_specform_config_selects_config_file() {
    let ctx = TestContext::new();
    std::fs::write(ctx.path().join("alt.yaml"), "output_dir: alt-out\n").unwrap();
    let spec = ctx.spec("summary.spec.md", VALID_SPEC);

    ctx.command()
        .env("SPECFORM_CONFIG", "alt.yaml")
        .arg("compile")
        .arg(&spec)
        .assert()
        .success();

    assert!(ctx.path().join("alt-out/summarize-a-technical-article").is_dir());
    assert!(!ctx.path().join(".specform").exists());
}

#[test]
fn test_quiet_flag_beats_rust_log() {
    let ctx = TestContext::new();
    let spec = ctx.spec("summary.spec.md", VALID_SPEC);

    ctx.command()
        .env("RUST_LOG", "trace")
        .args(["-q", "check"])
        .arg(&spec)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
