// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use bon::Builder;
use flume::bounded;
use ignore::WalkBuilder;
use tracing::{trace, warn};
use wax::{Glob, Pattern as _};

use crate::error::{FsError, LayoutError, Result};

/// Options for parallel directory traversal.
///
/// Defaults include hidden entries and do not consult ignore files.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Maximum depth to traverse (None = unlimited, 1 = direct children)
    #[builder(setters(name = with_max_depth))]
    max_depth: Option<usize>,
    #[builder(setters(name = with_follow_links), default = false)]
    follow_links: bool,
    #[builder(setters(name = with_include_hidden), default = true)]
    include_hidden: bool,
    #[builder(setters(name = with_respect_gitignore), default = false)]
    respect_gitignore: bool,
    /// Number of threads (None = auto-detect)
    #[builder(setters(name = with_threads))]
    threads: Option<usize>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    /// Options that only look at the direct children of the root.
    #[must_use]
    pub fn top_level() -> Self {
        Self::builder().with_max_depth(1).build()
    }

    #[must_use]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    #[must_use]
    pub const fn follow_links(&self) -> bool {
        self.follow_links
    }

    #[must_use]
    pub const fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    #[must_use]
    pub const fn respect_gitignore(&self) -> bool {
        self.respect_gitignore
    }

    #[must_use]
    pub const fn threads(&self) -> Option<usize> {
        self.threads
    }
}

fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    builder.max_depth(options.max_depth());
    builder.follow_links(options.follow_links());
    builder.hidden(!options.include_hidden());

    builder.ignore(options.respect_gitignore());
    builder.parents(options.respect_gitignore());
    builder.git_ignore(options.respect_gitignore());
    builder.git_global(options.respect_gitignore());
    builder.git_exclude(options.respect_gitignore());

    if let Some(threads) = options.threads() {
        builder.threads(threads);
    }

    builder
}

/// Finds files matching a glob pattern using parallel traversal.
///
/// The pattern is matched against the path relative to `root`; prefix it
/// with `(?i)` for case-insensitive matching. Results are sorted so callers
/// see a stable order regardless of thread scheduling.
///
/// # Errors
///
/// Returns an error if:
/// - The root directory does not exist.
/// - The glob pattern is invalid.
/// - An entry below the root cannot be read (the first such error).
///
/// # Example
/// ```no_run
/// use oob_layout::utility::fs::walk::{find_files, WalkOptions};
///
/// let projects = find_files("/path/to/corefx/src", "**/*.pkgproj", &WalkOptions::default())?;
/// for file in projects {
///     println!("{}", file.display());
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn find_files<P: AsRef<Path>>(
    root: P,
    pattern: &str,
    options: &WalkOptions,
) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();

    if !root.is_dir() {
        return Err(LayoutError::from(FsError::NotFound(root.display().to_string())).into());
    }

    let glob =
        Glob::new(pattern).map_err(|e| anyhow::anyhow!("invalid glob pattern '{pattern}': {e}"))?;
    let glob = Arc::new(glob);

    let (tx, rx) = bounded::<PathBuf>(1000);
    let first_error: Arc<OnceLock<String>> = Arc::new(OnceLock::new());
    let root_path = root.to_path_buf();

    let walker = build_walker(root, options).build_parallel();

    let errors = Arc::clone(&first_error);

    // The receiver is drained on this thread while the walker threads send,
    // so the bounded channel cannot fill up and block them.
    let mut files: Vec<PathBuf> = std::thread::scope(|scope| {
        scope.spawn(move || {
            walker.run(|| {
                let tx = tx.clone();
                let glob = Arc::clone(&glob);
                let root_path = root_path.clone();
                let errors = Arc::clone(&errors);

                Box::new(move |entry_result| {
                    match entry_result {
                        Ok(entry) => {
                            if entry.file_type().is_some_and(|ft| ft.is_file())
                                && let Ok(rel_path) = entry.path().strip_prefix(&root_path)
                                && glob.is_match(rel_path)
                            {
                                let _ = tx.send(entry.path().to_path_buf());
                            }
                        }
                        Err(e) => {
                            warn!(error = %e, "walk error");
                            let _ = errors.set(e.to_string());
                            return ignore::WalkState::Quit;
                        }
                    }
                    ignore::WalkState::Continue
                })
            });
            drop(tx);
        });
        rx.iter().collect()
    });
    if let Some(message) = first_error.get() {
        return Err(LayoutError::from(FsError::Walk {
            root: root.display().to_string(),
            message: message.clone(),
        })
        .into());
    }

    files.sort();

    trace!(
        root = %root.display(),
        pattern,
        matches = files.len(),
        "walk finished"
    );

    Ok(files)
}
