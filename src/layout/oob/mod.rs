// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Out-of-band assembly stage.
//!
//! ```text
//! <source>/src/**/*.pkgproj   (sorted)
//!   |  path contains an exclude entry?  --> excluded
//!   v
//! classify()  InBand --> skip
//!   |  OutOfBand
//!   v
//! <source>/<netcoreapp_ref>/<stem>.dll  missing? --> skip (debug)
//!   |
//!   v  overwrite
//! <out_dir>/<stem>.dll
//! ```

#[cfg(test)]
mod tests;

use std::path::Path;

use anyhow::Context;
use tracing::{debug, info};

use super::project::classify::classify;
use super::{LayoutContext, copy_assembly};
use crate::error::{LayoutError, Result};
use crate::utility::fs::copy::{CopyMode, is_file};
use crate::utility::fs::walk::{WalkOptions, find_files};

/// Counts gathered by [`run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OobReport {
    /// Metadata files found under `src`.
    pub scanned: usize,
    /// Metadata files skipped by `layout.exclude`.
    pub excluded: usize,
    /// Metadata files classified in-band.
    pub in_band: usize,
    /// Assemblies copied into the layout.
    pub copied: usize,
    /// Out-of-band modules without a compiled reference assembly.
    pub missing: usize,
}

/// Copies the reference assembly of every out-of-band project.
///
/// # Errors
///
/// Returns an error if `layout.source_dir` is unset, `<source>/src` does not
/// exist, a project hierarchy is malformed, or a copy fails.
pub async fn run(ctx: &LayoutContext) -> Result<OobReport> {
    let config = ctx.config();
    let source_dir = config.source_dir().map_err(LayoutError::from)?;
    let ref_dir = config.netcoreapp_ref_dir().map_err(LayoutError::from)?;
    let exclude = &config.layout.exclude;

    info!("==== Copying OOB assemblies ====");

    let projects = find_files(source_dir.join("src"), "**/*.pkgproj", &WalkOptions::default())
        .context("Failed to scan for .pkgproj files")?;

    let mut report = OobReport {
        scanned: projects.len(),
        ..OobReport::default()
    };

    for pkgproj in &projects {
        if is_excluded(pkgproj, source_dir, exclude) {
            debug!(file = %pkgproj.display(), "Excluded");
            report.excluded += 1;
            continue;
        }

        if !classify(pkgproj)?.is_out_of_band() {
            report.in_band += 1;
            continue;
        }

        let Some(stem) = pkgproj.file_stem() else {
            continue;
        };
        let file_name = format!("{}.dll", stem.to_string_lossy());
        let src = ref_dir.join(&file_name);
        if !is_file(&src).await? {
            debug!(src = %src.display(), "Reference assembly not found, skipping");
            report.missing += 1;
            continue;
        }

        copy_assembly(ctx, &src, &ctx.out_dir().join(&file_name), CopyMode::Overwrite).await?;
        report.copied += 1;
    }

    debug!(?report, "OOB stage finished");
    Ok(report)
}

/// Matches exclusion entries against the path relative to the source root.
fn is_excluded(pkgproj: &Path, source_dir: &Path, exclude: &[String]) -> bool {
    let relative = pkgproj.strip_prefix(source_dir).unwrap_or(pkgproj);
    let relative = relative.to_string_lossy();
    exclude
        .iter()
        .filter(|entry| !entry.is_empty())
        .any(|entry| relative.contains(entry.as_str()))
}
