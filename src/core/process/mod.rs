// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning and management.
//!
//! ```text
//! ProcessBuilder::new("dotnet")
//!   .arg() .cwd() .env() .capture_stderr()
//!   .resolve()                 bare name --> PATH lookup
//!       |
//!       v
//!   CommandRunner::run()       SystemRunner: tokio::process::Command
//!       |                      stream stdout/stderr to the log
//!       v
//!   ProcessOutput { exit_code, stdout, stderr }
//! ```

pub mod builder;
mod io;
pub mod runner;
#[cfg(test)]
mod tests;
