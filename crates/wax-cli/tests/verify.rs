//! `wax verify` end to end.

mod common;

use std::fs;

use predicates::prelude::*;

use common::{activate, TestContext};

#[test]
fn fresh_project_is_valid_but_ignored() {
    let ctx = TestContext::new();
    let root = ctx.new_project("demo", &[]);

    ctx.command_in(&root)
        .arg("verify")
        .assert()
        .success()
        .stdout("This project is valid, but the ignore flag is set.\n");
}

#[test]
fn activated_project_is_valid() {
    let ctx = TestContext::new();
    let root = ctx.new_project("demo", &[]);
    activate(&root);

    ctx.command_in(&root)
        .arg("verify")
        .assert()
        .success()
        .stdout("This project is valid.\n");
}

#[test]
fn missing_anchor_exits_not_found() {
    let ctx = TestContext::new();

    ctx.command()
        .arg("verify")
        .assert()
        .code(6)
        .stderr(predicate::str::contains("could not find anchor.yml in this directory"))
        .stderr(predicate::str::contains("Try changing anchor.yaml to anchor.yml."))
        .stderr(predicate::str::contains("suggestions:").not());
}

#[test]
fn misnamed_anchor_gets_a_suggestion() {
    let ctx = TestContext::new();
    let root = ctx.new_project("demo", &[]);
    fs::rename(root.join("anchor.yml"), root.join("anchor.yaml")).unwrap();

    ctx.command_in(&root)
        .arg("verify")
        .assert()
        .code(6)
        .stderr(predicate::str::contains("suggestions:"))
        .stderr(predicate::str::contains("rename it to anchor.yml"));
}

#[test]
fn wrong_format_version_is_invalid() {
    let ctx = TestContext::new();
    let root = ctx.new_project("demo", &[]);
    fs::write(
        root.join("anchor.yml"),
        "---\n- demo\n- '01'\n- tester\n...\n---\nignore: false\n",
    )
    .unwrap();

    ctx.command_in(&root)
        .arg("verify")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("anchor.yml is not a valid anchor"));
}

#[test]
fn garbage_anchor_is_invalid() {
    let ctx = TestContext::new();
    fs::write(ctx.path().join("anchor.yml"), "just: [one, document").unwrap();

    ctx.command().arg("verify").assert().code(5);
}

#[test]
fn latin1_anchor_decodes_with_encoding_flag() {
    let ctx = TestContext::new();
    let mut bytes = b"---\n- caf".to_vec();
    bytes.push(0xE9);
    bytes.extend_from_slice(b"\n- '00'\n- someone\n...\n---\nignore: false\n");
    fs::write(ctx.path().join("anchor.yml"), bytes).unwrap();

    ctx.command().arg("verify").assert().code(5);
    ctx.command()
        .args(["verify", "--encoding", "latin1"])
        .assert()
        .success()
        .stdout("This project is valid.\n");
}

#[test]
fn unknown_encoding_is_a_user_error() {
    let ctx = TestContext::new();

    ctx.command()
        .args(["verify", "-n", "ebcdic"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unsupported encoding: ebcdic"));
}

#[test]
fn json_format_reports_status_and_errors() {
    let ctx = TestContext::new();
    let root = ctx.new_project("demo", &[]);

    let output = ctx
        .command_in(&root)
        .args(["verify", "--format", "json"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "valid");
    assert_eq!(json["ignored"], true);

    let output = ctx
        .command()
        .args(["verify", "--format", "json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(6));
    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["code"], "E005");
}

#[test]
fn verify_is_repeatable() {
    let ctx = TestContext::new();
    let root = ctx.new_project("demo", &[]);

    for _ in 0..2 {
        ctx.command_in(&root)
            .arg("verify")
            .assert()
            .success()
            .stdout(predicate::str::contains("ignore flag is set"));
    }
}
