// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities with parallel traversal and async copy.
//!
//! ```text
//! walk:  find_files()      ignore::WalkParallel + wax glob, sorted
//!        WalkOptions       max_depth, hidden, gitignore
//! copy:  copy_file_async() Overwrite | SkipExisting
//!        list_files_with_extension(), ensure_dir()
//! ```

pub mod copy;
pub mod walk;
