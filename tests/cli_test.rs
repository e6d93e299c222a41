//! Integration tests for the `setmeup` binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn setup_profile(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("profile.yaml"), config).unwrap();
    temp
}

fn setmeup(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("setmeup"));
    cmd.current_dir(temp.path())
        .env("CI", "true")
        .env_remove("RUST_LOG");
    cmd
}

const SIMPLE_CONFIG: &str = r#"
env_vars:
  - name: SETMEUP_CLI_TEST_VAR
    description: a test value
steps:
  - script: echo hello
    description: greet
"#;

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("setmeup"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("apply"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("setmeup"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn plan_prints_and_writes_default_plan_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_profile(SIMPLE_CONFIG);
    setmeup(&temp)
        .args(["plan", "profile.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Execution Plan"))
        .stdout(predicate::str::contains("SETMEUP_CLI_TEST_VAR"))
        .stdout(predicate::str::contains("Execute Script echo hello"));

    let plan = fs::read_to_string(temp.path().join("setmeup_plan.yaml"))?;
    assert!(plan.contains("setmeup_version"));
    assert!(plan.contains("steps_to_execute"));
    Ok(())
}

#[test]
fn plan_honors_plan_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_profile(SIMPLE_CONFIG);
    setmeup(&temp)
        .args(["plan", "profile.yaml", "-p", "custom.yaml"])
        .assert()
        .success();

    assert!(temp.path().join("custom.yaml").exists());
    assert!(!temp.path().join("setmeup_plan.yaml").exists());
    Ok(())
}

#[test]
fn plan_with_missing_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    setmeup(&temp)
        .args(["plan", "missing.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.yaml"));
    Ok(())
}

#[test]
fn plan_with_cycle_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_profile("inherits: [profile.yaml]\n");
    setmeup(&temp)
        .args(["plan", "profile.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("inherits from itself"));
    Ok(())
}

#[test]
fn apply_runs_saved_plan() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_profile(SIMPLE_CONFIG);
    setmeup(&temp).args(["plan", "profile.yaml"]).assert().success();

    setmeup(&temp)
        .arg("apply")
        .env("SETMEUP_VALUE_SETMEUP_CLI_TEST_VAR", "hi")
        .assert()
        .success()
        .stdout(predicate::str::contains("hello"))
        .stdout(predicate::str::contains("Apply finished"));

    let plan = fs::read_to_string(temp.path().join("setmeup_plan.yaml"))?;
    assert!(!plan.contains("executed_at: null"));
    Ok(())
}

#[test]
fn apply_without_value_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_profile(SIMPLE_CONFIG);
    setmeup(&temp).args(["plan", "profile.yaml"]).assert().success();

    setmeup(&temp)
        .arg("apply")
        .env_remove("SETMEUP_CLI_TEST_VAR")
        .env_remove("SETMEUP_VALUE_SETMEUP_CLI_TEST_VAR")
        .assert()
        .failure()
        .stderr(predicate::str::contains("SETMEUP_CLI_TEST_VAR"));
    Ok(())
}

#[test]
fn apply_with_failing_step_exits_nonzero() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_profile("steps:\n  - script: exit 3\n");
    setmeup(&temp)
        .args(["plan", "profile.yaml", "--apply"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("halted"));
    Ok(())
}

#[test]
fn apply_with_missing_plan_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    setmeup(&temp)
        .args(["apply", "--plan", "nope.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.yaml"));
    Ok(())
}

#[test]
fn completions_generate_for_bash() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("setmeup"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("setmeup"));
    Ok(())
}
