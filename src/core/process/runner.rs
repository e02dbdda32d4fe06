// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution.
//!
//! ```text
//! CommandRunner::run(ProcessBuilder)
//!        |
//!        +-- SystemRunner --> ProcessBuilder::run()
//!        |                       build_command()
//!        |                       spawn() --> run_child()
//!        |                       validate exit_code
//!        |                       (stderr kept for the error)
//!        |
//!        +-- test doubles (no spawning)
//!        |
//!        v
//!   ProcessOutput { exit_code, stdout, stderr }
//! ```

use std::process::Stdio;

use futures_util::future::BoxFuture;
use tokio::process::Command;
use tracing::{debug, error, trace};

use super::builder::{ProcessBuilder, ProcessOutput, StreamFlags};
use crate::error::{LayoutError, ProcessError, Result};

/// Executes external commands.
///
/// The layout pipeline only talks to the package manager through this
/// trait, so tests can substitute a runner that never spawns anything.
pub trait CommandRunner: Send + Sync {
    /// Runs the command to completion.
    ///
    /// Implementations must fail with [`ProcessError::NonZeroExit`] when the
    /// command exits unsuccessfully.
    fn run<'a>(&'a self, command: ProcessBuilder) -> BoxFuture<'a, Result<ProcessOutput>>;
}

/// Runs commands as real child processes through tokio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run<'a>(&'a self, command: ProcessBuilder) -> BoxFuture<'a, Result<ProcessOutput>> {
        Box::pin(command.run())
    }
}

impl ProcessBuilder {
    /// Spawns and runs the process, waiting for completion.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Spawning the child process fails.
    /// - The process exits with a non-zero status. Captured stderr is carried
    ///   in the error.
    /// - Waiting on the child fails.
    pub async fn run(self) -> Result<ProcessOutput> {
        let name = self.display_name();
        let cmd_line = self.command_line();

        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        let mut child = self.build_command().spawn().map_err(|source| {
            LayoutError::from(ProcessError::SpawnFailed {
                command: cmd_line.clone(),
                source,
            })
        })?;
        trace!(process = %name, pid = ?child.id(), "spawned");

        let output = self.run_child(&name, &mut child).await?;

        if !output.success() {
            if !output.stderr().is_empty() {
                error!(process = %name, stderr = %output.stderr(), "process error output");
            }
            return Err(LayoutError::from(ProcessError::NonZeroExit {
                command: cmd_line,
                code: output.exit_code(),
                stderr: output.stderr().to_string(),
            })
            .into());
        }

        trace!(process = %name, exit_code = output.exit_code(), "completed");
        Ok(output)
    }

    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());
        command.args(self.arguments());

        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }

        if let Some(env) = self.environment() {
            command.env_clear();
            command.envs(env.iter());
        }

        command.stdin(Stdio::null());
        command.stdout(stdio_from_flags(self.stdout_config()));
        command.stderr(stdio_from_flags(self.stderr_config()));
        command.kill_on_drop(true);

        command
    }
}

fn stdio_from_flags(flags: StreamFlags) -> Stdio {
    if flags.is_empty() {
        Stdio::null()
    } else {
        Stdio::piped()
    }
}
