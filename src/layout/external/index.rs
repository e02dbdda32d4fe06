// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! External dependency index.
//!
//! ```json
//! { "Packages": { "System.Data.SqlClient": "4.5.1", "Microsoft.Win32.Registry": "4.5.0" } }
//! ```

use std::path::Path;

use serde_json::Value;

use crate::error::{FsError, IndexError, LayoutResult};

/// A package to restore, in index order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReference {
    pub name: String,
    pub version: String,
}

impl PackageReference {
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// File name of the package's primary assembly.
    #[must_use]
    pub fn assembly_name(&self) -> String {
        format!("{}.dll", self.name)
    }
}

/// Reads and parses an index file.
///
/// # Errors
///
/// Returns `FsError` if the file cannot be read, plus the errors of
/// [`parse_index`].
pub fn load_index(path: &Path) -> LayoutResult<Vec<PackageReference>> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            FsError::NotFound(path.display().to_string())
        } else {
            FsError::io(path, e)
        }
    })?;
    parse_index(path, &text)
}

/// Parses index text; `path` is used for error messages.
///
/// Keys other than `Packages` are ignored.
///
/// # Errors
///
/// Returns `IndexError::Parse` for invalid JSON, `IndexError::MissingPackages`
/// if there is no `Packages` object, and `IndexError::InvalidVersion` for a
/// version that is not a non-blank string.
pub fn parse_index(path: &Path, text: &str) -> LayoutResult<Vec<PackageReference>> {
    let display = || path.display().to_string();

    let document: Value = serde_json::from_str(text).map_err(|e| IndexError::Parse {
        path: display(),
        message: e.to_string(),
    })?;

    let packages = document
        .get("Packages")
        .and_then(Value::as_object)
        .ok_or_else(|| IndexError::MissingPackages { path: display() })?;

    packages
        .iter()
        .map(|(name, version)| {
            version
                .as_str()
                .map(str::trim)
                .filter(|version| !version.is_empty())
                .map(|version| PackageReference::new(name, version))
                .ok_or_else(|| {
                    IndexError::InvalidVersion {
                        path: display(),
                        name: name.clone(),
                    }
                    .into()
                })
        })
        .collect()
}
