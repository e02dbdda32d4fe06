// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration section types.
//!
//! ```text
//! Config: GlobalConfig, LayoutConfig, RestoreConfig, ToolsConfig
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Deserializer};

/// Default NuGet feeds, `;`-separated as `RestoreSources` expects.
pub const DEFAULT_RESTORE_SOURCES: &str = "https://dotnetfeed.blob.core.windows.net/dotnet-core/index.json;https://api.nuget.org/v3/index.json";

/// Global configuration options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log writes and the package-manager call instead of performing them.
    pub dry: bool,
}

/// Where assemblies come from and where they go.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Root of the source tree holding `src/**/*.pkgproj`.
    pub source_dir: Option<PathBuf>,
    /// Reference-assemblies folder, relative to `source_dir`.
    pub netcoreapp_ref: PathBuf,
    /// Output layout directory.
    pub out_dir: PathBuf,
    /// Skip the out-of-band stage and only resolve external packages.
    pub just_external: bool,
    /// Metadata files whose path contains any of these are never classified.
    #[serde(deserialize_with = "string_or_list")]
    pub exclude: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            source_dir: None,
            netcoreapp_ref: PathBuf::from("artifacts/bin/ref/netcoreapp"),
            out_dir: PathBuf::from("PlatformExtensions"),
            just_external: false,
            exclude: vec!["Native".to_string(), "Private".to_string()],
        }
    }
}

/// Settings for restoring and publishing external packages.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RestoreConfig {
    /// JSON index with a `Packages` name → version object.
    pub external_index: Option<PathBuf>,
    /// Target framework moniker.
    pub framework: String,
    /// Runtime identifier.
    pub rid: String,
    /// Runtime framework version.
    pub runtime_version: String,
    /// Package feeds, `;`-separated.
    pub sources: String,
    /// Directory receiving the generated project and its publish output.
    pub project_dir: PathBuf,
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self {
            external_index: None,
            framework: "netcoreapp3.0".to_string(),
            rid: "win7-x64".to_string(),
            runtime_version: "2.1".to_string(),
            sources: DEFAULT_RESTORE_SOURCES.to_string(),
            project_dir: PathBuf::from("obj/generated"),
        }
    }
}

/// Tool paths configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// Package manager executable; bare names are looked up in PATH.
    pub dotnet: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            dotnet: PathBuf::from("dotnet"),
        }
    }
}

/// Accepts either a list or a single comma-separated string, so lists can be
/// given through `--set` and environment variables.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        String(String),
        List(Vec<String>),
    }

    Ok(match StringOrList::deserialize(deserializer)? {
        StringOrList::List(items) => items,
        StringOrList::String(joined) => joined
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
    })
}
