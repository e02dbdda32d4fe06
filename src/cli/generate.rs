// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Generate command arguments.
//!
//! ```text
//! SOURCE_DIR          --> layout.source_dir
//! EXTERNAL_INDEX      --> restore.external_index
//! --netcoreapp-ref    --> layout.netcoreapp_ref
//! -o/--out            --> layout.out_dir
//! --framework         --> restore.framework
//! --rid               --> restore.rid
//! --runtime-version   --> restore.runtime_version
//! --restore-sources   --> restore.sources
//! --dotnet-cli        --> tools.dotnet
//! --just-external     --> layout.just_external
//! ```

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `generate` command.
///
/// Every argument is optional on the command line as long as the value is
/// provided by a configuration file or environment variable.
#[derive(Debug, Clone, Default, Args)]
pub struct GenerateArgs {
    /// Root of the source tree containing `src/**/*.pkgproj`.
    #[arg(value_name = "SOURCE_DIR")]
    pub source_dir: Option<PathBuf>,

    /// JSON index containing external dependencies.
    #[arg(value_name = "EXTERNAL_INDEX")]
    pub external_index: Option<PathBuf>,

    /// Reference-assemblies folder, relative to SOURCE_DIR.
    #[arg(long = "netcoreapp-ref", value_name = "PATH")]
    pub netcoreapp_ref: Option<PathBuf>,

    /// Output directory.
    #[arg(short = 'o', long = "out", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Framework to restore external dependencies for.
    #[arg(long, value_name = "TFM")]
    pub framework: Option<String>,

    /// Runtime identifier.
    #[arg(long, value_name = "RID")]
    pub rid: Option<String>,

    /// Runtime framework version.
    #[arg(long = "runtime-version", value_name = "VERSION")]
    pub runtime_version: Option<String>,

    /// Path to the dotnet CLI.
    #[arg(long = "dotnet-cli", value_name = "PATH")]
    pub dotnet_cli: Option<PathBuf>,

    /// NuGet restore sources separated by ';'.
    #[arg(long = "restore-sources", value_name = "SOURCES")]
    pub restore_sources: Option<String>,

    /// Restore just the external index, skipping out-of-band assemblies.
    #[arg(long = "just-external")]
    pub just_external: bool,
}

impl GenerateArgs {
    /// Converts the arguments to `section/key=value` configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = Vec::new();

        let paths = [
            ("layout/source_dir", &self.source_dir),
            ("restore/external_index", &self.external_index),
            ("layout/netcoreapp_ref", &self.netcoreapp_ref),
            ("layout/out_dir", &self.out_dir),
            ("tools/dotnet", &self.dotnet_cli),
        ];
        for (key, value) in paths {
            if let Some(path) = value {
                overrides.push(format!("{key}={}", path.display()));
            }
        }

        let values = [
            ("restore/framework", &self.framework),
            ("restore/rid", &self.rid),
            ("restore/runtime_version", &self.runtime_version),
            ("restore/sources", &self.restore_sources),
        ];
        for (key, value) in values {
            if let Some(value) = value {
                overrides.push(format!("{key}={value}"));
            }
        }

        if self.just_external {
            overrides.push("layout/just_external=true".to_string());
        }

        overrides
    }
}
