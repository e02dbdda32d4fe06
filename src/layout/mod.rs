// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layout generation pipeline.
//!
//! ```text
//! generate(ctx)
//!   |
//!   +--> ensure out_dir
//!   |
//!   +--> oob::run        (skipped when layout.just_external)
//!   |      src/**/*.pkgproj --> classify --> <ref>/<stem>.dll --> out_dir
//!   |
//!   +--> external::run
//!          index.json --> generated.csproj --> dotnet publish --> out_dir
//! ```
//!
//! Every write and the package-manager call honour [`LayoutContext::is_dry_run`].

pub mod external;
pub mod oob;
pub mod project;

#[cfg(test)]
pub(crate) mod test_utils;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::config::Config;
use crate::core::process::runner::CommandRunner;
use crate::error::Result;
use crate::utility::fs::copy::{CopyMode, CopyOutcome, copy_file_async, ensure_dir, path_exists};

use external::ExternalReport;
use oob::OobReport;

/// Context shared by the layout stages.
///
/// Carries the configuration, the dry-run flag and the runner used for the
/// package-manager call.
#[derive(Clone)]
pub struct LayoutContext {
    /// When true, stages log what they would write without touching disk.
    dry_run: bool,

    config: Arc<Config>,

    runner: Arc<dyn CommandRunner>,
}

impl LayoutContext {
    #[must_use]
    pub const fn new(config: Arc<Config>, runner: Arc<dyn CommandRunner>, dry_run: bool) -> Self {
        Self {
            dry_run,
            config,
            runner,
        }
    }

    /// Returns a reference to the configuration.
    #[must_use]
    pub const fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Returns the runner for external commands.
    #[must_use]
    pub fn runner(&self) -> &dyn CommandRunner {
        self.runner.as_ref()
    }

    /// Returns whether this is a dry-run execution.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Output layout directory.
    #[must_use]
    pub fn out_dir(&self) -> &Path {
        &self.config.layout.out_dir
    }
}

/// Summary of a complete run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutReport {
    /// `None` when the out-of-band stage was skipped.
    pub oob: Option<OobReport>,
    pub external: ExternalReport,
}

impl LayoutReport {
    /// Total number of files copied (or that would be copied in dry-run).
    #[must_use]
    pub fn copied(&self) -> usize {
        self.oob.as_ref().map_or(0, |oob| oob.copied) + self.external.copied()
    }
}

/// Runs both stages against the configured source tree and index.
///
/// # Errors
///
/// Returns the first error of either stage; the output directory may be
/// left partially populated.
pub async fn generate(ctx: &LayoutContext) -> Result<LayoutReport> {
    let out_dir = ctx.out_dir();
    if ctx.is_dry_run() {
        info!(dir = %out_dir.display(), "[dry-run] Would create output directory");
    } else {
        ensure_dir(out_dir)
            .await
            .context("Failed to create output directory")?;
    }

    let oob = if ctx.config().layout.just_external {
        info!("Skipping OOB assemblies (just_external)");
        None
    } else {
        Some(
            oob::run(ctx)
                .await
                .context("Failed to copy OOB assemblies")?,
        )
    };

    let external = external::run(ctx)
        .await
        .context("Failed to copy external dependencies")?;

    let report = LayoutReport { oob, external };
    info!(
        copied = report.copied(),
        out_dir = %out_dir.display(),
        "Layout generated"
    );
    Ok(report)
}

/// Copies one assembly into the layout, logging `src -> dst`.
///
/// In dry-run the copy is only logged. `SkipExisting` is honoured in both
/// modes.
pub(crate) async fn copy_assembly(
    ctx: &LayoutContext,
    src: &Path,
    dst: &Path,
    mode: CopyMode,
) -> Result<CopyOutcome> {
    if ctx.is_dry_run() {
        if mode == CopyMode::SkipExisting && path_exists(dst).await? {
            return Ok(CopyOutcome::Skipped);
        }
        info!(
            src = %src.display(),
            dst = %dst.display(),
            "[dry-run] Would copy"
        );
        return Ok(CopyOutcome::Copied);
    }

    let outcome = copy_file_async(src, dst, mode).await?;
    if outcome == CopyOutcome::Copied {
        info!("{} -> {}", src.display(), dst.display());
    }
    Ok(outcome)
}
