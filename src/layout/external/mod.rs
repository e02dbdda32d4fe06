// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! External dependency stage.
//!
//! ```text
//! restore.external_index
//!   |  parse_index()            empty Packages --> done
//!   v
//! ProjectDescriptor --> <project_dir>/generated.csproj
//!   |
//!   v  PublishTool (CommandRunner)
//! <project_dir>/publish/refs
//!   |
//!   +--> copy_direct()      overwrite
//!   +--> copy_transitive()  copy-if-absent
//!   v
//! out_dir
//! ```

pub mod copy;
pub mod descriptor;
pub mod index;
pub mod publish;


use anyhow::Context;
use tracing::{debug, info};

use crate::config::normalize_separators;
use crate::error::{FsError, LayoutError, Result};
use crate::layout::LayoutContext;
use crate::utility::fs::copy::path_exists;

use descriptor::{DESCRIPTOR_FILE, ProjectDescriptor};
use index::load_index;
use publish::PublishTool;

/// Counts gathered by [`run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExternalReport {
    /// Packages listed in the index.
    pub packages: usize,
    /// Whether the package manager was invoked.
    pub published: bool,
    pub direct_copied: usize,
    /// Packages whose primary assembly was not in the publish output.
    pub direct_missing: usize,
    pub transitive_copied: usize,
    pub transitive_skipped: usize,
}

impl ExternalReport {
    #[must_use]
    pub const fn copied(&self) -> usize {
        self.direct_copied + self.transitive_copied
    }
}

/// Restores the indexed packages and copies their assemblies into the layout.
///
/// # Errors
///
/// Returns an error if a required path is unset, the index is malformed, the
/// publish fails or its output is missing, or a copy fails.
pub async fn run(ctx: &LayoutContext) -> Result<ExternalReport> {
    let config = ctx.config();
    let index_path = config.external_index().map_err(LayoutError::from)?;
    let ref_dir = config.netcoreapp_ref_dir().map_err(LayoutError::from)?;

    let packages = load_index(index_path)?;
    let mut report = ExternalReport {
        packages: packages.len(),
        ..ExternalReport::default()
    };
    if packages.is_empty() {
        info!(index = %index_path.display(), "No external packages to restore");
        return Ok(report);
    }

    info!("==== Generating project to restore external dependencies ====");
    let descriptor = ProjectDescriptor::from_config(&config.restore, packages);
    let project_dir = normalize_separators(&config.restore.project_dir);
    let descriptor_path = if ctx.is_dry_run() {
        let path = project_dir.join(DESCRIPTOR_FILE);
        info!(path = %path.display(), "[dry-run] Would write project descriptor");
        debug!("{}", descriptor.render());
        path
    } else {
        let path = descriptor
            .write(&project_dir)
            .await
            .context("Failed to write project descriptor")?;
        info!("Generated project -> {}", path.display());
        path
    };

    let publish_dir = PublishTool::new(&descriptor_path).run(ctx).await?;
    report.published = !ctx.is_dry_run();

    if !path_exists(&publish_dir).await? {
        if ctx.is_dry_run() {
            info!(dir = %publish_dir.display(), "[dry-run] Publish output not present, skipping copy");
            return Ok(report);
        }
        return Err(LayoutError::from(FsError::NotFound(publish_dir.display().to_string())).into());
    }

    info!("==== Copy external dependencies ====");
    let direct = copy::copy_direct(ctx, &publish_dir, descriptor.packages()).await?;
    report.direct_copied = direct.copied.len();
    report.direct_missing = direct.missing;

    let transitive = copy::copy_transitive(ctx, &publish_dir, &ref_dir, &direct.copied).await?;
    report.transitive_copied = transitive.copied;
    report.transitive_skipped = transitive.skipped;

    debug!(?report, "External stage finished");
    Ok(report)
}
