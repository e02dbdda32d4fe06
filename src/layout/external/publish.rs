// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `dotnet publish` invocation for the generated descriptor.
//!
//! ```text
//! cwd = <project_dir>
//! dotnet publish generated.csproj -o publish /p:RestoreSources=<sources>
//!   env += DOTNET_SKIP_FIRST_TIME_EXPERIENCE=1, DOTNET_MULTILEVEL_LOOKUP=0
//!   --> <project_dir>/publish/refs
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use crate::core::env::current_env;
use crate::core::process::builder::ProcessBuilder;
use crate::error::{LayoutError, Result};
use crate::layout::LayoutContext;

/// Output folder passed to `-o`, relative to the descriptor.
pub const PUBLISH_DIR: &str = "publish";

/// Folder inside [`PUBLISH_DIR`] holding the flattened reference set.
pub const REFS_DIR: &str = "refs";

/// Publishes a generated descriptor with the configured package manager.
#[derive(Debug, Clone)]
pub struct PublishTool {
    descriptor: PathBuf,
}

impl PublishTool {
    #[must_use]
    pub fn new(descriptor: impl AsRef<Path>) -> Self {
        Self {
            descriptor: descriptor.as_ref().to_path_buf(),
        }
    }

    /// Directory containing the descriptor; used as the working directory.
    #[must_use]
    pub fn project_dir(&self) -> &Path {
        self.descriptor.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Directory the published reference assemblies land in.
    #[must_use]
    pub fn refs_dir(&self) -> PathBuf {
        self.project_dir().join(PUBLISH_DIR).join(REFS_DIR)
    }

    /// Builds the command without resolving the executable.
    #[must_use]
    pub fn command(&self, ctx: &LayoutContext) -> ProcessBuilder {
        let file_name = self
            .descriptor
            .file_name()
            .map_or_else(|| self.descriptor.clone(), PathBuf::from);
        let env = current_env()
            .with("DOTNET_SKIP_FIRST_TIME_EXPERIENCE", "1")
            .with("DOTNET_MULTILEVEL_LOOKUP", "0");

        let mut builder = ProcessBuilder::new(program_path(&ctx.config().tools.dotnet))
            .name("dotnet publish")
            .arg("publish")
            .arg(file_name)
            .arg("-o")
            .arg(PUBLISH_DIR)
            .arg(format!("/p:RestoreSources={}", ctx.config().restore.sources))
            .env(env)
            .capture_stderr();
        if !self.project_dir().as_os_str().is_empty() {
            builder = builder.cwd(self.project_dir());
        }
        builder
    }

    /// Runs the publish and returns [`PublishTool::refs_dir`].
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if a bare program name is
    /// not in `PATH`, and `ProcessError::NonZeroExit` if publishing fails.
    pub async fn run(&self, ctx: &LayoutContext) -> Result<PathBuf> {
        let refs = self.refs_dir();
        let command = self.command(ctx);

        if ctx.is_dry_run() {
            info!(
                cwd = %self.project_dir().display(),
                command = %command.command_line(),
                "[dry-run] Would publish external dependencies"
            );
            return Ok(refs);
        }

        info!("==== Publishing external dependencies ====");
        let command = command.resolve().map_err(LayoutError::from)?;
        info!("{}", command.command_line());

        ctx.runner()
            .run(command)
            .await
            .context("Error when publishing generated project")?;
        Ok(refs)
    }
}

/// Anchors a relative program path with a directory component to the
/// current directory, since the child runs inside the project directory.
/// Bare names are left for PATH lookup.
fn program_path(program: &Path) -> PathBuf {
    if program.is_relative() && program.components().count() > 1 {
        std::path::absolute(program).unwrap_or_else(|_| program.to_path_buf())
    } else {
        program.to_path_buf()
    }
}
