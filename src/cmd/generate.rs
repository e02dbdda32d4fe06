// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Generate command implementation for oob-layout.

use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::core::process::runner::SystemRunner;
use crate::error::{LayoutError, Result};
use crate::layout::{LayoutContext, LayoutReport, generate};

/// Main handler for the generate command.
///
/// The command's own arguments are already merged into `config` as
/// overrides.
///
/// # Errors
///
/// Returns an error if a required path is missing or either stage fails.
pub async fn run_generate_command(config: &Config, dry_run: bool) -> Result<LayoutReport> {
    config.source_dir().map_err(LayoutError::from)?;
    config.external_index().map_err(LayoutError::from)?;

    let ctx = LayoutContext::new(
        Arc::new(config.clone()),
        Arc::new(SystemRunner),
        dry_run || config.global.dry,
    );

    let report = generate(&ctx).await?;
    if let Some(oob) = &report.oob {
        info!(
            scanned = oob.scanned,
            excluded = oob.excluded,
            in_band = oob.in_band,
            copied = oob.copied,
            "OOB assemblies"
        );
    }
    info!(
        packages = report.external.packages,
        copied = report.external.copied(),
        skipped = report.external.transitive_skipped,
        "External dependencies"
    );
    Ok(report)
}
