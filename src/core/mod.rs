// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for process and environment management.
//!
//! ```text
//!          core
//!           |
//!     +-----+-----+
//!     v           v
//!    env       process
//!     |           |
//!    Env       Builder, Output
//!  current_env CommandRunner, SystemRunner
//! ```

pub mod env;
pub mod process;
