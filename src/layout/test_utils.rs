// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Fixtures shared by the layout stage tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use futures_util::future::BoxFuture;
use tempfile::TempDir;

use super::LayoutContext;
use crate::config::Config;
use crate::core::process::builder::{ProcessBuilder, ProcessOutput};
use crate::core::process::runner::CommandRunner;
use crate::error::{LayoutError, ProcessError, Result};

/// Runner that materializes `publish/refs` instead of spawning a process.
#[derive(Default)]
pub(crate) struct FakeRunner {
    /// `(file name, contents)` written into the refs folder.
    files: Vec<(String, String)>,
    /// Whether a successful run creates the refs folder at all.
    materialize: bool,
    exit_code: i32,
    commands: Mutex<Vec<ProcessBuilder>>,
}

impl FakeRunner {
    pub(crate) fn publishing(files: &[(&str, &str)]) -> Self {
        Self {
            files: files
                .iter()
                .map(|(name, contents)| ((*name).to_string(), (*contents).to_string()))
                .collect(),
            materialize: true,
            ..Self::default()
        }
    }

    /// Succeeds without producing a publish folder.
    pub(crate) fn without_output() -> Self {
        Self::default()
    }

    pub(crate) fn failing(exit_code: i32) -> Self {
        Self {
            exit_code,
            ..Self::default()
        }
    }

    pub(crate) fn commands(&self) -> Vec<ProcessBuilder> {
        self.commands
            .lock()
            .map(|commands| commands.clone())
            .unwrap_or_default()
    }

    fn publish(&self, command: &ProcessBuilder) -> Result<ProcessOutput> {
        if let Ok(mut commands) = self.commands.lock() {
            commands.push(command.clone());
        }
        if self.exit_code != 0 {
            return Err(LayoutError::from(ProcessError::NonZeroExit {
                command: command.command_line(),
                code: self.exit_code,
                stderr: String::new(),
            })
            .into());
        }

        if !self.materialize {
            return Ok(ProcessOutput::new(0, String::new(), String::new()));
        }

        let cwd = command.working_dir().unwrap_or_else(|| Path::new("."));
        let refs = cwd.join("publish").join("refs");
        fs::create_dir_all(&refs)?;
        for (name, contents) in &self.files {
            fs::write(refs.join(name), contents)?;
        }
        Ok(ProcessOutput::new(0, String::new(), String::new()))
    }
}

impl CommandRunner for FakeRunner {
    fn run<'a>(&'a self, command: ProcessBuilder) -> BoxFuture<'a, Result<ProcessOutput>> {
        Box::pin(async move { self.publish(&command) })
    }
}

/// A temporary source tree, index and output directory.
pub(crate) struct Fixture {
    pub(crate) dir: TempDir,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("corefx").join("src")).unwrap();
        fs::create_dir_all(Self::ref_dir_in(dir.path())).unwrap();
        let fixture = Self { dir };
        fixture.write_index(r#"{"Packages": {}}"#);
        fixture
    }

    fn ref_dir_in(root: &Path) -> PathBuf {
        root.join("corefx")
            .join("artifacts")
            .join("bin")
            .join("ref")
            .join("netcoreapp")
    }

    pub(crate) fn source_dir(&self) -> PathBuf {
        self.dir.path().join("corefx")
    }

    pub(crate) fn ref_dir(&self) -> PathBuf {
        Self::ref_dir_in(self.dir.path())
    }

    pub(crate) fn out_dir(&self) -> PathBuf {
        self.dir.path().join("layout")
    }

    pub(crate) fn project_dir(&self) -> PathBuf {
        self.dir.path().join("obj").join("generated")
    }

    pub(crate) fn index_path(&self) -> PathBuf {
        self.dir.path().join("index.json")
    }

    /// Adds `src/<group>/<name>/pkg/<name>.pkgproj` with its own props file.
    pub(crate) fn add_project(&self, group: &str, name: &str, props: &str) -> PathBuf {
        let root = self.source_dir().join("src").join(group).join(name);
        fs::create_dir_all(root.join("pkg")).unwrap();
        fs::write(root.join("Directory.Build.props"), props).unwrap();
        let pkgproj = root.join("pkg").join(format!("{name}.pkgproj"));
        fs::write(&pkgproj, "<Project />").unwrap();
        pkgproj
    }

    /// Adds a reference assembly `<name>.dll` to the source tree.
    pub(crate) fn add_ref(&self, name: &str) {
        fs::write(self.ref_dir().join(format!("{name}.dll")), name).unwrap();
    }

    pub(crate) fn write_index(&self, json: &str) {
        fs::write(self.index_path(), json).unwrap();
    }

    pub(crate) fn config(&self) -> Config {
        let mut config = Config::default();
        config.layout.source_dir = Some(self.source_dir());
        config.layout.out_dir = self.out_dir();
        config.restore.external_index = Some(self.index_path());
        config.restore.project_dir = self.project_dir();
        config.tools.dotnet = PathBuf::from("/opt/dotnet/dotnet");
        config
    }

    pub(crate) fn context(&self, config: Config, runner: Arc<FakeRunner>, dry_run: bool) -> LayoutContext {
        LayoutContext::new(Arc::new(config), runner, dry_run)
    }

    /// Sorted file names in the output directory.
    pub(crate) fn layout_files(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.out_dir()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// Props text with the given flags.
pub(crate) fn props(is_ref: Option<bool>, is_app: Option<bool>) -> String {
    let mut group = String::new();
    if let Some(value) = is_ref {
        group.push_str(&format!("<IsNETCoreAppRef>{value}</IsNETCoreAppRef>"));
    }
    if let Some(value) = is_app {
        group.push_str(&format!("<IsNETCoreApp>{value}</IsNETCoreApp>"));
    }
    format!("<Project><PropertyGroup>{group}</PropertyGroup></Project>")
}
