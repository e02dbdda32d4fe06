// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::{FsError, LayoutError, Result};

/// How [`copy_file_async`] treats an existing destination file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMode {
    /// Replace whatever is at the destination.
    Overwrite,
    /// Leave an existing destination untouched.
    SkipExisting,
}

/// Outcome of a single file copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// The destination already existed and [`CopyMode::SkipExisting`] was used.
    Skipped,
}

fn io_error(path: &Path, source: std::io::Error) -> anyhow::Error {
    LayoutError::from(FsError::io(path, source)).into()
}

/// Copies a single file (async version).
///
/// # Errors
///
/// Returns an error if the source cannot be read or the destination cannot
/// be written.
///
/// # Example
/// ```no_run
/// use oob_layout::utility::fs::copy::{copy_file_async, CopyMode};
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// copy_file_async(
///     Path::new("publish/refs/Foo.dll"),
///     Path::new("PlatformExtensions/Foo.dll"),
///     CopyMode::Overwrite,
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn copy_file_async(src: &Path, dst: &Path, mode: CopyMode) -> Result<CopyOutcome> {
    if mode == CopyMode::SkipExisting && path_exists(dst).await? {
        return Ok(CopyOutcome::Skipped);
    }

    fs::copy(src, dst).await.map_err(|e| io_error(src, e))?;
    Ok(CopyOutcome::Copied)
}

/// Returns whether `path` exists, treating permission problems as errors.
///
/// # Errors
///
/// Returns an error if the existence check itself fails.
pub async fn path_exists(path: &Path) -> Result<bool> {
    fs::try_exists(path).await.map_err(|e| io_error(path, e))
}

/// Returns whether `path` is an existing regular file.
///
/// # Errors
///
/// Returns an error if the metadata cannot be read for any reason other than
/// the path not existing.
pub async fn is_file(path: &Path) -> Result<bool> {
    match fs::metadata(path).await {
        Ok(meta) => Ok(meta.is_file()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(io_error(path, e)),
    }
}

/// Creates `dir` and all missing parents.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub async fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).await.map_err(|e| io_error(dir, e))
}

/// Lists regular files directly inside `dir` whose extension matches `ext`
/// case-insensitively. Subdirectories are not entered.
///
/// Returns paths sorted by file name.
///
/// # Errors
///
/// Returns `FsError::NotFound` if `dir` does not exist, or an I/O error if
/// it cannot be read.
pub async fn list_files_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(LayoutError::from(FsError::NotFound(dir.display().to_string())).into());
        }
        Err(e) => return Err(io_error(dir, e)),
    };

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| io_error(dir, e))? {
        let path = entry.path();
        let matches = path
            .extension()
            .is_some_and(|found| found.to_string_lossy().eq_ignore_ascii_case(ext));
        if matches && is_file(&path).await? {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
