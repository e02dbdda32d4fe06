// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable management for child processes.
//!
//! ```text
//! current_env()  --> Env (snapshot of the parent environment)
//!                     .set("DOTNET_...", "1")
//!                     --> ProcessBuilder::env(env)
//! ```
//!
//! Keys compare case-insensitively so `Path` and `PATH` collapse into a
//! single entry, matching how Windows resolves them.

pub mod container;

#[cfg(test)]
mod tests;

/// Captures the current process environment.
///
/// Variables whose name or value is not valid Unicode are skipped.
#[must_use]
pub fn current_env() -> container::Env {
    std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}
