// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::builder::{ProcessBuilder, StreamFlags};
use super::runner::{CommandRunner, SystemRunner};
use crate::core::env::container::Env;
use crate::core::env::current_env;
use crate::error::{LayoutError, ProcessError};

#[test]
fn test_command_line_quotes_spaces() {
    let builder = ProcessBuilder::new("dotnet")
        .arg("publish")
        .arg("obj/my project/generated.csproj")
        .arg("-o")
        .arg("publish");

    insta::assert_snapshot!(
        builder.command_line(),
        @r#"dotnet publish "obj/my project/generated.csproj" -o publish"#
    );
    assert_eq!(builder.display_name(), "dotnet");
    assert_eq!(builder.name("restore").display_name(), "restore");
}

#[test]
fn test_resolve_keeps_paths_with_directories() {
    let builder = ProcessBuilder::new("./tools/dotnet").resolve().unwrap();
    assert_eq!(builder.program(), std::path::Path::new("./tools/dotnet"));
}

#[test]
fn test_resolve_missing_bare_name() {
    let err = ProcessBuilder::new("nonexistent_program_12345")
        .resolve()
        .unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"executable not found: 'nonexistent_program_12345' (not in PATH)"
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_captures_stdout() {
    let output = ProcessBuilder::new("/bin/sh")
        .arg("-c")
        .arg("echo hello; echo world")
        .stdout_flags(StreamFlags::KEEP_IN_STRING)
        .run()
        .await
        .expect("echo should succeed");

    assert!(output.success());
    insta::assert_snapshot!(output.stdout(), @r"
    hello
    world
    ");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_non_zero_exit_is_error() {
    let command = ProcessBuilder::new("/bin/sh")
        .arg("-c")
        .arg("echo oops >&2; exit 3")
        .stdout_flags(StreamFlags::empty())
        .stderr_flags(StreamFlags::empty());
    let err = SystemRunner.run(command).await.unwrap_err();

    let err = err.downcast::<LayoutError>().expect("typed error");
    let LayoutError::Process(process) = err else {
        panic!("expected process error, got {err:?}");
    };
    let ProcessError::NonZeroExit { code, stderr, .. } = *process else {
        panic!("expected a non-zero exit");
    };
    assert_eq!(code, 3);
    // Discarded streams leave nothing for the report.
    assert_eq!(stderr, "");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_failure_carries_captured_stderr() {
    let command = ProcessBuilder::new("/bin/sh")
        .arg("-c")
        .arg("echo restoring; echo oops >&2; exit 42")
        .capture_stderr();
    let err = SystemRunner.run(command).await.unwrap_err();

    let err = err.downcast::<LayoutError>().expect("typed error");
    let LayoutError::Process(process) = err else {
        panic!("expected process error, got {err:?}");
    };
    let ProcessError::NonZeroExit { code, stderr, .. } = *process else {
        panic!("expected a non-zero exit");
    };
    assert_eq!(code, 42);
    assert_eq!(stderr, "oops");
}

#[test]
fn test_capture_stderr_keeps_forwarding() {
    let builder = ProcessBuilder::new("dotnet").capture_stderr();
    assert_eq!(
        builder.stderr_config(),
        StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_env_and_cwd() {
    let temp = tempfile::tempdir().unwrap();
    let mut env: Env = current_env();
    env.set("OOB_TEST_VAR", "test_value");

    let output = ProcessBuilder::new("/bin/sh")
        .arg("-c")
        .arg("echo $OOB_TEST_VAR; pwd")
        .cwd(temp.path())
        .env(env)
        .stdout_flags(StreamFlags::KEEP_IN_STRING)
        .run()
        .await
        .expect("process should succeed");

    let mut lines = output.stdout().lines();
    assert_eq!(lines.next(), Some("test_value"));
    let cwd = std::path::PathBuf::from(lines.next().unwrap());
    assert_eq!(
        cwd.canonicalize().unwrap(),
        temp.path().canonicalize().unwrap()
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_many_lines_do_not_stall() {
    let output = ProcessBuilder::new("/bin/sh")
        .arg("-c")
        .arg("i=0; while [ $i -lt 2000 ]; do echo line$i; i=$((i+1)); done")
        .stdout_flags(StreamFlags::KEEP_IN_STRING)
        .run()
        .await
        .expect("process should succeed");

    assert_eq!(output.stdout().lines().count(), 2000);
}

#[tokio::test]
async fn test_spawn_failure() {
    let err = ProcessBuilder::new("/nonexistent/dir/program")
        .run()
        .await
        .unwrap_err();
    assert!(err.to_string().contains("failed to spawn process"));
}
