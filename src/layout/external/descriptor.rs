// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Generated project descriptor consumed by `dotnet publish`.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use bon::Builder;
use tokio::fs;

use super::index::PackageReference;
use crate::config::types::RestoreConfig;
use crate::error::{FsError, LayoutError, Result};
use crate::utility::fs::copy::ensure_dir;

/// File name of the generated descriptor inside `restore.project_dir`.
pub const DESCRIPTOR_FILE: &str = "generated.csproj";

/// An SDK-style project referencing every indexed package.
#[derive(Debug, Clone, Builder)]
pub struct ProjectDescriptor {
    #[builder(into)]
    framework: String,
    #[builder(into)]
    rid: String,
    #[builder(into)]
    runtime_version: String,
    packages: Vec<PackageReference>,
}

impl ProjectDescriptor {
    /// Builds a descriptor from the restore settings.
    #[must_use]
    pub fn from_config(restore: &RestoreConfig, packages: Vec<PackageReference>) -> Self {
        Self::builder()
            .framework(restore.framework.trim())
            .rid(restore.rid.trim())
            .runtime_version(restore.runtime_version.trim())
            .packages(packages)
            .build()
    }

    #[must_use]
    pub fn packages(&self) -> &[PackageReference] {
        &self.packages
    }

    /// Renders the project XML.
    #[must_use]
    pub fn render(&self) -> String {
        let mut xml = String::new();
        let _ = write!(
            xml,
            concat!(
                "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n",
                "<Project Sdk=\"Microsoft.NET.Sdk\">\n",
                "  <PropertyGroup>\n",
                "    <PreserveCompilationContext>true</PreserveCompilationContext>\n",
                "    <NETCoreAppMaximumVersion>99.9</NETCoreAppMaximumVersion>\n",
                "    <TargetFramework>{framework}</TargetFramework>\n",
                "    <RuntimeIdentifier>{rid}</RuntimeIdentifier>\n",
                "    <RuntimeFrameworkVersion>{runtime_version}</RuntimeFrameworkVersion>\n",
                "  </PropertyGroup>\n",
                "  <ItemGroup>\n",
            ),
            framework = escape_xml(&self.framework),
            rid = escape_xml(&self.rid),
            runtime_version = escape_xml(&self.runtime_version),
        );
        for package in &self.packages {
            let _ = writeln!(
                xml,
                "    <PackageReference Include=\"{}\" Version=\"{}\" />",
                escape_xml(&package.name),
                escape_xml(&package.version)
            );
        }
        xml.push_str("  </ItemGroup>\n");
        xml.push_str("</Project>\n");
        xml
    }

    /// Writes the descriptor to `<dir>/generated.csproj`, creating `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub async fn write(&self, dir: &Path) -> Result<PathBuf> {
        ensure_dir(dir).await?;
        let path = dir.join(DESCRIPTOR_FILE);
        fs::write(&path, self.render())
            .await
            .map_err(|e| LayoutError::from(FsError::io(&path, e)))?;
        Ok(path)
    }
}

/// Escapes text for use in XML content and double-quoted attributes.
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
