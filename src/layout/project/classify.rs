// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Out-of-band classification of `.pkgproj` metadata files.
//!
//! ```text
//! src/System.Foo/pkg/System.Foo.pkgproj
//!     |
//!     v  project root (two levels up)
//! src/System.Foo/
//!     |
//!     v  first dir*.props (case-insensitive, top level)
//! src/System.Foo/Directory.Build.props
//!     |  no <PropertyGroup>?  follow <Import Project=".."/> (relative to root)
//!     v
//! PropertyLookup::Found(properties) | NotFound  -->  Band
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use super::{Band, Import, PropertyLookup, PropsDocument};
use crate::config::normalize_separators;
use crate::error::{FsError, LayoutError, ProjectError, Result};
use crate::utility::fs::walk::{WalkOptions, find_files};

/// Maximum number of `<Import>` hops followed from the top-level props file.
pub const MAX_IMPORT_DEPTH: usize = 8;

/// Pattern for the top-level properties file of a project root.
const PROPS_PATTERN: &str = "(?i)dir*.props";

/// Returns the project root of a metadata file: two directory levels up.
///
/// # Errors
///
/// Returns `ProjectError::NoProjectRoot` if the path is not nested deeply
/// enough.
pub fn project_root(pkgproj: &Path) -> Result<&Path> {
    pkgproj
        .parent()
        .and_then(Path::parent)
        .filter(|root| !root.as_os_str().is_empty())
        .ok_or_else(|| {
            LayoutError::from(ProjectError::NoProjectRoot {
                file: pkgproj.display().to_string(),
            })
            .into()
        })
}

/// Finds the first `dir*.props` file directly inside `root`.
///
/// # Errors
///
/// Returns `ProjectError::PropsNotFound` if there is none, or a filesystem
/// error if `root` cannot be scanned.
pub fn find_props(root: &Path) -> Result<PathBuf> {
    find_files(root, PROPS_PATTERN, &WalkOptions::top_level())?
        .into_iter()
        .next()
        .ok_or_else(|| {
            LayoutError::from(ProjectError::PropsNotFound {
                root: root.display().to_string(),
            })
            .into()
        })
}

/// Looks up the property group of `props`, following imports.
///
/// Import paths are resolved against `root`, not against the importing
/// file. A missing import target ends the chain with `NotFound`.
///
/// # Errors
///
/// Returns a `ProjectError` for an import without a `Project` attribute, a
/// cycle, a chain longer than [`MAX_IMPORT_DEPTH`], malformed XML or a
/// non-boolean flag.
pub fn resolve_properties(props: &Path, root: &Path) -> Result<PropertyLookup> {
    let mut visited = Vec::new();
    resolve_chain(props, props, root, &mut visited)
}

fn resolve_chain(
    start: &Path,
    file: &Path,
    root: &Path,
    visited: &mut Vec<PathBuf>,
) -> Result<PropertyLookup> {
    let canonical = match std::fs::canonicalize(file) {
        Ok(path) => path,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(file = %file.display(), "Imported props file not found");
            return Ok(PropertyLookup::NotFound);
        }
        Err(e) => return Err(LayoutError::from(FsError::io(file, e)).into()),
    };

    if visited.contains(&canonical) {
        return Err(LayoutError::from(ProjectError::ImportCycle {
            file: file.display().to_string(),
        })
        .into());
    }
    if visited.len() > MAX_IMPORT_DEPTH {
        return Err(LayoutError::from(ProjectError::ImportTooDeep {
            file: start.display().to_string(),
            limit: MAX_IMPORT_DEPTH,
        })
        .into());
    }
    visited.push(canonical);

    let doc = PropsDocument::load(file)?;
    if let Some(properties) = doc.properties() {
        trace!(file = %file.display(), ?properties, "Resolved property group");
        return Ok(PropertyLookup::Found(*properties));
    }

    match doc.import() {
        Import::Absent | Import::Empty => {
            trace!(file = %file.display(), "No property group and no import");
            Ok(PropertyLookup::NotFound)
        }
        Import::MissingProject => Err(LayoutError::from(ProjectError::MissingImportProject {
            file: file.display().to_string(),
        })
        .into()),
        Import::Path(relative) => {
            let next = root.join(normalize_separators(Path::new(relative)));
            debug!(from = %file.display(), to = %next.display(), "Following import");
            resolve_chain(start, &next, root, visited)
        }
    }
}

/// Classifies one `.pkgproj` file.
///
/// # Errors
///
/// Propagates the errors of [`project_root`], [`find_props`] and
/// [`resolve_properties`].
pub fn classify(pkgproj: &Path) -> Result<Band> {
    let root = project_root(pkgproj)?;
    let props = find_props(root)?;
    let band = resolve_properties(&props, root)?.band();
    trace!(file = %pkgproj.display(), ?band, "Classified");
    Ok(band)
}
