//! End-to-end tests of the binary against a scripted `docker` stand-in.
#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

use qgenie_launcher::bootstrap::Lifecycle;

/// Records its arguments, then behaves according to `FAKE_*` variables.
const FAKE_DOCKER: &str = r#"#!/bin/sh
echo "$*" >> "$(dirname "$0")/calls.log"
case "$1" in
  build)
    if [ -n "$FAKE_BUILD_EXIT" ]; then
      echo "ERROR: failed to solve: app.py: not found" >&2
      exit "$FAKE_BUILD_EXIT"
    fi
    if [ -n "$FAKE_BUILD_LATIN1" ]; then
      printf 'Collecting caf\351\n'
      i=0
      while [ $i -lt 20000 ]; do echo "step $i"; i=$((i+1)); done
    fi
    echo "Successfully tagged $3"
    ;;
  rm)
    if [ -n "$FAKE_RM_ERROR" ]; then
      echo "$FAKE_RM_ERROR" >&2
      exit 1
    fi
    echo "Error response from daemon: No such container: $3" >&2
    # docker >= 20.10 exits 0 here; older clients and podman exit 1.
    exit "${FAKE_RM_MISSING_EXIT:-0}"
    ;;
  run)
    if [ -n "$FAKE_RUN_EXIT" ]; then
      echo "docker: Error response from daemon: port is already allocated." >&2
      exit "$FAKE_RUN_EXIT"
    fi
    echo 0123456789ab
    ;;
esac
"#;

struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    /// A build context with the fake runtime wired in through `.qgenierc`.
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        for name in ["Dockerfile", "requirements.txt", "app.py"] {
            std::fs::write(dir.path().join(name), "").expect("failed to write build file");
        }

        let bin_dir = dir.path().join("bin");
        std::fs::create_dir(&bin_dir).expect("failed to create bin dir");
        let docker = bin_dir.join("docker");
        std::fs::write(&docker, FAKE_DOCKER).expect("failed to write fake docker");
        std::fs::set_permissions(&docker, std::fs::Permissions::from_mode(0o755))
            .expect("failed to chmod fake docker");

        std::fs::write(
            dir.path().join(".qgenierc"),
            format!("docker_binary: {}\nlock_dir: .\n", docker.display()),
        )
        .expect("failed to write .qgenierc");

        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("qgenie-launcher").expect("binary not built");
        cmd.current_dir(self.path()).env_remove("RUST_LOG");
        cmd
    }

    /// Runtime subcommands invoked so far, one entry per call.
    fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.log_path())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn log_path(&self) -> PathBuf {
        self.path().join("bin/calls.log")
    }
}

fn subcommands(calls: &[String]) -> Vec<&str> {
    calls
        .iter()
        .filter_map(|c| c.split_whitespace().next())
        .collect()
}

#[test]
fn clean_run_publishes_requested_port() {
    let project = Project::new();

    project
        .cmd()
        .arg("9090")
        .assert()
        .success()
        .stdout(predicate::str::contains("QGenie is running at http://localhost:9090"));

    let calls = project.calls();
    assert_eq!(subcommands(&calls), ["build", "rm", "run"]);
    assert!(calls[0].starts_with("build -t qgenie:latest"));
    assert_eq!(calls[1], "rm -f qgenie");
    assert!(calls[2].contains("-p 9090:8080"));
    assert!(calls[2].contains("-e PORT=8080 -e WORK_DIR=/work"));
    assert!(calls[2].ends_with("qgenie:latest"));
    assert!(project.path().join("work/projects").is_dir());
}

#[test]
fn omitted_port_uses_default() {
    let project = Project::new();

    project
        .cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:8080"));

    assert!(project.calls()[2].contains("-p 8080:8080"));
}

#[test]
fn repeated_runs_both_succeed() {
    let project = Project::new();

    project.cmd().arg("9090").assert().success();
    project.cmd().arg("9090").assert().success();

    assert_eq!(
        subcommands(&project.calls()),
        ["build", "rm", "run", "build", "rm", "run"]
    );
}

#[test]
fn existing_workspace_is_preserved() {
    let project = Project::new();
    let work = project.path().join("work");
    std::fs::create_dir_all(&work).unwrap();
    std::fs::write(work.join("keep.txt"), "data").unwrap();

    project.cmd().assert().success();

    assert_eq!(std::fs::read_to_string(work.join("keep.txt")).unwrap(), "data");
    assert!(work.join("projects").is_dir());
}

#[test]
fn build_failure_exits_with_build_status() {
    let project = Project::new();

    let assert = project
        .cmd()
        .env("FAKE_BUILD_EXIT", "3")
        .assert()
        .code(3);

    // Printed by the runtime, not repeated by the launcher.
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert_eq!(stderr.matches("failed to solve").count(), 1);
    assert!(stderr.contains("bootstrap failed"));

    assert_eq!(subcommands(&project.calls()), ["build"]);
}

#[test]
fn non_utf8_build_output_is_passed_through() {
    let project = Project::new();

    let assert = project
        .cmd()
        .env("FAKE_BUILD_LATIN1", "1")
        .arg("9090")
        .assert()
        .success();

    let stdout = &assert.get_output().stdout;
    assert!(stdout.windows(15).any(|w| w == b"Collecting caf\xe9"));
    let text = String::from_utf8_lossy(stdout);
    assert!(text.contains("step 19999"));
    assert!(text.contains("QGenie is running at http://localhost:9090"));
    assert_eq!(subcommands(&project.calls()), ["build", "rm", "run"]);
}

#[test]
fn missing_previous_container_is_logged_as_absent() {
    for missing_exit in ["0", "1"] {
        let project = Project::new();

        project
            .cmd()
            .env("RUST_LOG", "qgenie_launcher=debug")
            .env("FAKE_RM_MISSING_EXIT", missing_exit)
            .assert()
            .success()
            .stderr(predicate::str::contains("no previous container"))
            .stderr(predicate::str::contains("could not remove").not());
    }
}

#[test]
fn removal_failure_does_not_affect_exit_code() {
    let project = Project::new();

    project
        .cmd()
        .env("FAKE_RM_ERROR", "Error response from daemon: removal of container qgenie is already in progress")
        .assert()
        .success()
        .stderr(predicate::str::contains("could not remove previous container"));

    assert_eq!(subcommands(&project.calls()), ["build", "rm", "run"]);
}

#[test]
fn creation_failure_exits_with_run_status() {
    let project = Project::new();

    project
        .cmd()
        .env("FAKE_RUN_EXIT", "125")
        .assert()
        .code(125)
        .stderr(predicate::str::contains("port is already allocated"));
}

#[test]
fn missing_entry_file_fails_before_runtime() {
    let project = Project::new();
    std::fs::remove_file(project.path().join("app.py")).unwrap();

    project
        .cmd()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("build context is missing"));

    assert!(!project.log_path().exists());
}

#[test]
fn non_numeric_port_is_a_usage_error() {
    let project = Project::new();

    project.cmd().arg("http").assert().code(2);

    assert!(!project.log_path().exists());
}

#[test]
fn held_slot_is_rejected() {
    let project = Project::new();
    let _slot = Lifecycle::new(project.path())
        .acquire("qgenie")
        .expect("failed to take slot");

    project
        .cmd()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("held by another launcher"));

    assert!(!project.log_path().exists());
}

#[test]
fn missing_runtime_binary_exits_127() {
    let project = Project::new();
    std::fs::write(
        project.path().join(".qgenierc"),
        "docker_binary: qgenie-launcher-no-such-docker\nlock_dir: .\n",
    )
    .unwrap();

    project.cmd().assert().code(127);
}
