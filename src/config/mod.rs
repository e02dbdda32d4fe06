// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. oob-layout.toml (cwd, optional)
//! 3. --ini FILE...
//! 4. OOB_* env vars
//! 5. --set section/key=value
//! 6. generate arguments
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! OOB_GLOBAL__DRY=true              → global.dry = true
//! OOB_LAYOUT__OUT_DIR=/tmp/layout   → layout.out_dir = "/tmp/layout"
//! OOB_RESTORE__FRAMEWORK=net8.0     → restore.framework = "net8.0"
//! OOB_LAYOUT__EXCLUDE=Native,Tests  → layout.exclude = ["Native", "Tests"]
//! ```

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{GlobalConfig, LayoutConfig, RestoreConfig, ToolsConfig};

/// Name of the configuration file picked up from the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "oob-layout.toml";

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "OOB";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub global: GlobalConfig,
    pub layout: LayoutConfig,
    pub restore: RestoreConfig,
    pub tools: ToolsConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use oob_layout::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("oob-layout.toml")
    ///     .with_env_prefix("OOB")
    ///     .set("restore.framework", "net8.0")?
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validates values that have no usable default.
    ///
    /// Paths required only by `generate` are checked later through
    /// [`Config::source_dir`] and [`Config::external_index`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for blank restore settings or an
    /// empty tool path.
    pub fn validate(&self) -> Result<()> {
        let non_blank = [
            ("restore", "framework", self.restore.framework.as_str()),
            ("restore", "rid", self.restore.rid.as_str()),
            (
                "restore",
                "runtime_version",
                self.restore.runtime_version.as_str(),
            ),
        ];
        for (section, key, value) in non_blank {
            if value.trim().is_empty() {
                return Err(invalid(section, key, "must not be empty"));
            }
        }

        if self.tools.dotnet.as_os_str().is_empty() {
            return Err(invalid("tools", "dotnet", "must not be empty"));
        }
        if self.layout.out_dir.as_os_str().is_empty() {
            return Err(invalid("layout", "out_dir", "must not be empty"));
        }
        if self.restore.project_dir.as_os_str().is_empty() {
            return Err(invalid("restore", "project_dir", "must not be empty"));
        }
        Ok(())
    }

    /// Source tree root.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if `layout.source_dir` is unset.
    pub fn source_dir(&self) -> std::result::Result<&Path, ConfigError> {
        self.layout
            .source_dir
            .as_deref()
            .ok_or_else(|| missing("layout", "source_dir"))
    }

    /// External dependency index file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if `restore.external_index` is unset.
    pub fn external_index(&self) -> std::result::Result<&Path, ConfigError> {
        self.restore
            .external_index
            .as_deref()
            .ok_or_else(|| missing("restore", "external_index"))
    }

    /// Reference-assemblies folder inside the source tree.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if `layout.source_dir` is unset.
    pub fn netcoreapp_ref_dir(&self) -> std::result::Result<PathBuf, ConfigError> {
        Ok(self
            .source_dir()?
            .join(normalize_separators(&self.layout.netcoreapp_ref)))
    }

    /// Format configuration options for display.
    ///
    /// Returns aligned `key = value` lines in key order.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_layout_options(&mut options);
        self.format_restore_options(&mut options);
        self.format_tools_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("global.dry".into(), self.global.dry.to_string());
    }

    fn format_layout_options(&self, options: &mut BTreeMap<String, String>) {
        let layout = &self.layout;
        options.insert("layout.source_dir".into(), fmt_opt(layout.source_dir.as_deref()));
        options.insert(
            "layout.netcoreapp_ref".into(),
            layout.netcoreapp_ref.display().to_string(),
        );
        options.insert("layout.out_dir".into(), layout.out_dir.display().to_string());
        options.insert(
            "layout.just_external".into(),
            layout.just_external.to_string(),
        );
        options.insert("layout.exclude".into(), layout.exclude.join(","));
    }

    fn format_restore_options(&self, options: &mut BTreeMap<String, String>) {
        let restore = &self.restore;
        options.insert(
            "restore.external_index".into(),
            fmt_opt(restore.external_index.as_deref()),
        );
        options.insert("restore.framework".into(), restore.framework.clone());
        options.insert("restore.rid".into(), restore.rid.clone());
        options.insert(
            "restore.runtime_version".into(),
            restore.runtime_version.clone(),
        );
        options.insert("restore.sources".into(), restore.sources.clone());
        options.insert(
            "restore.project_dir".into(),
            restore.project_dir.display().to_string(),
        );
    }

    fn format_tools_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "tools.dotnet".into(),
            self.tools.dotnet.display().to_string(),
        );
    }
}

/// Rewrites `\` separators to the platform separator.
///
/// Project files and defaults inherited from Windows tooling spell relative
/// paths with backslashes; on Windows this is a no-op.
#[must_use]
pub fn normalize_separators(path: &Path) -> PathBuf {
    if cfg!(windows) {
        return path.to_path_buf();
    }
    PathBuf::from(path.to_string_lossy().replace('\\', "/"))
}

fn fmt_opt(path: Option<&Path>) -> String {
    path.map_or_else(String::new, |p| p.display().to_string())
}

fn missing(section: &str, key: &str) -> ConfigError {
    ConfigError::MissingKey {
        section: section.to_string(),
        key: key.to_string(),
    }
}

fn invalid(section: &str, key: &str, message: &str) -> anyhow::Error {
    crate::error::LayoutError::from(ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message: message.to_string(),
    })
    .into()
}
