// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            LayoutError (~24 bytes)
//!                   |
//!   +------+------+-+----+-------+----+-------+
//!   |      |      |      |       |    |       |
//!   v      v      v      v       v    v       v
//! Config Project Index Process  Fs   Io     Other
//!  Box    Box    Box    Box     Box  Box   Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Config   ParseError, MissingKey, InvalidValue
//!   Project  PropsNotFound, MissingImportProject, ImportCycle, InvalidBool
//!   Index    MissingPackages, InvalidVersion
//!   Process  ExecutableNotFound, SpawnFailed, NonZeroExit
//!   Fs       NotFound, Walk, IoError
//! ```

use std::path::Path;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`LayoutError`].
pub type LayoutResult<T> = std::result::Result<T, LayoutError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Project metadata could not be resolved.
    #[error("project error: {0}")]
    Project(#[from] Box<ProjectError>),

    /// External index is malformed.
    #[error("index error: {0}")]
    Index(#[from] Box<IndexError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for LayoutError {
                fn from(err: $error) -> Self {
                    LayoutError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    ProjectError => Project,
    IndexError => Index,
    ProcessError => Process,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Project Metadata Errors ---

/// Errors raised while resolving `.pkgproj` / `.props` metadata.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// The metadata file is not nested deeply enough to have a project root.
    #[error("cannot derive project root for '{file}'")]
    NoProjectRoot { file: String },

    /// No `dir*.props` file in the project root.
    #[error("no dir*.props file found in project root '{root}'")]
    PropsNotFound { root: String },

    /// An `<Import>` element has no `Project` attribute.
    #[error("<Import> without a Project attribute in '{file}'")]
    MissingImportProject { file: String },

    /// The import chain loops back onto a file already visited.
    #[error("import cycle detected at '{file}'")]
    ImportCycle { file: String },

    /// The import chain is longer than the supported depth.
    #[error("import chain starting at '{file}' exceeds {limit} levels")]
    ImportTooDeep { file: String, limit: usize },

    /// A flag property holds something other than a boolean.
    #[error("property '{property}' in '{file}' is not a boolean: '{value}'")]
    InvalidBool {
        file: String,
        property: String,
        value: String,
    },

    /// The document is not well-formed XML.
    #[error("failed to parse '{file}': {message}")]
    Xml { file: String, message: String },
}

// --- External Index Errors ---

/// Errors raised while reading the external dependency index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The document is not valid JSON.
    #[error("failed to parse index '{path}': {message}")]
    Parse { path: String, message: String },

    /// The document has no `Packages` object.
    #[error("index '{path}' has no 'Packages' object")]
    MissingPackages { path: String },

    /// A package version is not a non-empty string.
    #[error("package '{name}' in '{path}' has an invalid version")]
    InvalidVersion { path: String, name: String },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    ///
    /// `stderr` holds the captured error output, empty when none was kept.
    #[error("process '{command}' exited with code {code}{}", stderr_suffix(.stderr))]
    NonZeroExit {
        command: String,
        code: i32,
        stderr: String,
    },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// Directory traversal hit an unreadable entry.
    #[error("failed to walk '{root}': {message}")]
    Walk { root: String, message: String },

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(":\n{stderr}")
    }
}

impl FsError {
    /// Wraps an I/O error with the path it occurred on.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.display().to_string(),
            source,
        }
    }
}
