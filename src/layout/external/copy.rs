// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Copies published assemblies into the layout.
//!
//! ```text
//! direct pass      <publish>/<package>.dll  --> out_dir   (overwrite)
//! transitive pass  <publish>/*.dll          --> out_dir   (only if absent from
//!                                                          out_dir and ref dir)
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use tracing::debug;

use super::index::PackageReference;
use crate::error::Result;
use crate::layout::{LayoutContext, copy_assembly};
use crate::utility::fs::copy::{CopyMode, CopyOutcome, is_file, list_files_with_extension, path_exists};

/// Result of the direct pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectCopy {
    /// File names copied (or that would be copied in dry-run).
    pub copied: BTreeSet<String>,
    /// Packages without a primary assembly, such as metapackages.
    pub missing: usize,
}

/// Result of the transitive pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitiveCopy {
    pub copied: usize,
    /// Assemblies already in the layout or supplied by the source tree.
    pub skipped: usize,
}

/// Copies `<publish>/<name>.dll` for every package, overwriting.
///
/// # Errors
///
/// Returns an error if a copy fails.
pub async fn copy_direct(
    ctx: &LayoutContext,
    publish_dir: &Path,
    packages: &[PackageReference],
) -> Result<DirectCopy> {
    let mut result = DirectCopy::default();

    for package in packages {
        let file_name = package.assembly_name();
        let src = publish_dir.join(&file_name);
        if !is_file(&src).await? {
            debug!(package = %package.name, "No assembly for package, skipping");
            result.missing += 1;
            continue;
        }

        copy_assembly(ctx, &src, &ctx.out_dir().join(&file_name), CopyMode::Overwrite).await?;
        result.copied.insert(file_name);
    }

    Ok(result)
}

/// Copies the remaining top-level `*.dll` files of the publish output.
///
/// A file is copied only if no file of the same name exists in the layout
/// or in `ref_dir`. Names in `already_copied` are treated as present.
///
/// # Errors
///
/// Returns `FsError::NotFound` if `publish_dir` does not exist, or an error
/// if a copy fails.
pub async fn copy_transitive(
    ctx: &LayoutContext,
    publish_dir: &Path,
    ref_dir: &Path,
    already_copied: &BTreeSet<String>,
) -> Result<TransitiveCopy> {
    let mut result = TransitiveCopy::default();

    for src in list_files_with_extension(publish_dir, "dll").await? {
        let Some(file_name) = src.file_name().map(|name| name.to_string_lossy().into_owned())
        else {
            continue;
        };

        if already_copied.contains(&file_name) {
            result.skipped += 1;
            continue;
        }
        if path_exists(&ref_dir.join(&file_name)).await? {
            debug!(file = %file_name, "Supplied by source tree, skipping");
            result.skipped += 1;
            continue;
        }

        let dst = ctx.out_dir().join(&file_name);
        match copy_assembly(ctx, &src, &dst, CopyMode::SkipExisting).await? {
            CopyOutcome::Copied => result.copied += 1,
            CopyOutcome::Skipped => {
                debug!(file = %file_name, "Already in layout, skipping");
                result.skipped += 1;
            }
        }
    }

    Ok(result)
}
