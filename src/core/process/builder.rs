// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process builder with configuration options.
//!
//! ```text
//! ProcessBuilder
//!  • new/resolve
//!  • arg/cwd/env/name
//!  • stdout_flags/stderr_flags, capture_stderr
//!
//! StreamFlags: FORWARD_TO_LOG (default), KEEP_IN_STRING; empty discards
//! ```

use std::ffi::OsStr;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use bitflags::bitflags;

use crate::core::env::container::Env;
use crate::error::ProcessError;

bitflags! {
    /// Flags controlling stream handling for stdout/stderr.
    ///
    /// An empty set discards the stream.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StreamFlags: u32 {
        /// Forward output to tracing logs
        const FORWARD_TO_LOG = 0x01;
        /// Keep output in a string for later retrieval
        const KEEP_IN_STRING = 0x04;
    }
}

impl Default for StreamFlags {
    fn default() -> Self {
        Self::FORWARD_TO_LOG
    }
}

/// Output from a completed process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    exit_code: i32,
    stdout: String,
    stderr: String,
}

impl ProcessOutput {
    /// Creates a new `ProcessOutput`.
    ///
    /// Public so that alternative [`CommandRunner`](super::runner::CommandRunner)
    /// implementations can report results.
    #[must_use]
    pub const fn new(exit_code: i32, stdout: String, stderr: String) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
        }
    }

    /// Returns the process exit code (0 = success).
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Returns captured stdout (if `KEEP_IN_STRING` was set).
    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Returns captured stderr (if `KEEP_IN_STRING` was set).
    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Builder for configuring and running a process.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    /// Complete child environment; `None` inherits the parent's.
    env: Option<Env>,
    stdout: StreamFlags,
    stderr: StreamFlags,
    name: Option<String>,
}

impl ProcessBuilder {
    /// Creates a new `ProcessBuilder` for the given program.
    ///
    /// The program can be an absolute path, a relative path or a bare name.
    /// Bare names are looked up in PATH by [`ProcessBuilder::resolve`].
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
            env: None,
            stdout: StreamFlags::default(),
            stderr: StreamFlags::default(),
            name: None,
        }
    }

    /// Resolves a bare program name through PATH, keeping everything else.
    ///
    /// Programs given with a directory component (`./tools/dotnet`,
    /// `C:\dotnet\dotnet.exe`) are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if a bare name is not in PATH.
    pub fn resolve(mut self) -> Result<Self, ProcessError> {
        if self.is_bare_name() {
            let name = self.program.to_string_lossy().into_owned();
            self.program =
                which::which(&name).map_err(|_| ProcessError::ExecutableNotFound { name })?;
        }
        Ok(self)
    }

    fn is_bare_name(&self) -> bool {
        self.program.components().count() == 1 && !self.program.is_absolute()
    }

    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Sets the working directory for the process.
    #[must_use]
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Sets the complete environment for the process.
    #[must_use]
    pub fn env(mut self, env: Env) -> Self {
        self.env = Some(env);
        self
    }

    #[must_use]
    pub const fn stdout_flags(mut self, flags: StreamFlags) -> Self {
        self.stdout = flags;
        self
    }

    #[must_use]
    pub const fn stderr_flags(mut self, flags: StreamFlags) -> Self {
        self.stderr = flags;
        self
    }

    /// Keeps stderr for the error report while still forwarding it to the
    /// log.
    #[must_use]
    pub const fn capture_stderr(self) -> Self {
        let flags = self.stderr.union(StreamFlags::KEEP_IN_STRING);
        self.stderr_flags(flags)
    }

    /// Sets a display name for logging.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub fn working_dir(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    #[must_use]
    pub const fn environment(&self) -> Option<&Env> {
        self.env.as_ref()
    }

    pub(super) const fn stdout_config(&self) -> StreamFlags {
        self.stdout
    }

    pub(super) const fn stderr_config(&self) -> StreamFlags {
        self.stderr
    }

    /// Returns the display name for this process.
    ///
    /// Falls back to the program's file stem.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            self.program.file_stem().map_or_else(
                || "process".to_string(),
                |s| s.to_string_lossy().into_owned(),
            )
        })
    }

    /// Returns the full command line as a string, quoting arguments with
    /// spaces.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut cmd = self.program.display().to_string();
        for arg in &self.args {
            if arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }
}
