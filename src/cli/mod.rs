// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for oob-layout using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! oob-layout [global options] <command>
//! generate [SOURCE_DIR] [EXTERNAL_INDEX] [options]
//! options
//! inis
//! version
//! ```

pub mod generate;
pub mod global;


use crate::cli::generate::GenerateArgs;
use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// Out-of-Band Assembly Layout Generator
///
/// Collects out-of-band reference assemblies and their external package
/// dependencies into a single layout directory.
#[derive(Debug, Parser)]
#[command(
    name = "oob-layout",
    author,
    version,
    about = "Out-of-Band Assembly Layout Generator",
    long_about = "oob-layout Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Copies the reference assemblies of every out-of-band project in a\n\
                  source tree into a layout directory, then restores the packages\n\
                  listed in an external index and adds their assemblies as well.\n\n\
                  Invoking `oob-layout generate <source> <index.json>` produces the\n\
                  layout in ./PlatformExtensions. See `oob-layout <command> --help`\n\
                  for more information about a command.",
    after_help = "INI FILES:\n\n\
                  By default, oob-layout loads `oob-layout.toml` from the current\n\
                  directory if it exists. Additional files can be specified with\n\
                  --ini, those are loaded afterwards and override it. OOB_* environment\n\
                  variables (OOB_<SECTION>__<KEY>) come next, then --set options and\n\
                  finally the arguments of the command itself. Use --no-default-inis\n\
                  to skip `oob-layout.toml` and only use --ini."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values from the INIs.
    Options,

    /// Lists the INIs used by oob-layout.
    Inis,

    /// Generates the assembly layout.
    Generate(GenerateArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
