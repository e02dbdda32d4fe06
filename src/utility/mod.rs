// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! fs
//!   walk:  find_files(), WalkOptions
//!   copy:  copy_file_async(), list_files_with_extension()
//! ```

pub mod fs;
