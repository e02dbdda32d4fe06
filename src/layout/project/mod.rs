// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! MSBuild property documents and out-of-band classification.
//!
//! ```text
//! <Project>
//!   <PropertyGroup>                 --> ProjectProperties
//!     <IsNETCoreAppRef>false</..>        is_netcoreapp_ref: Option<bool>
//!     <IsNETCoreApp>true</..>            is_netcoreapp:     Option<bool>
//!   </PropertyGroup>
//!   <Import Project="..\x.props" />  --> Import::Path / Empty / MissingProject
//! </Project>
//!
//! ProjectProperties::band()
//!   IsNETCoreAppRef == false  --> OutOfBand
//!   IsNETCoreApp absent       --> OutOfBand
//!   IsNETCoreApp == true      --> InBand
//!   IsNETCoreApp == false     --> OutOfBand
//! ```

pub mod classify;


use std::path::{Path, PathBuf};

use roxmltree::{Document, Node};

use crate::error::{FsError, LayoutResult, ProjectError};

const PROPERTY_GROUP: &str = "PropertyGroup";
const IMPORT: &str = "Import";
const IS_NETCOREAPP_REF: &str = "IsNETCoreAppRef";
const IS_NETCOREAPP: &str = "IsNETCoreApp";

/// The flags of one resolved property group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectProperties {
    pub is_netcoreapp_ref: Option<bool>,
    pub is_netcoreapp: Option<bool>,
}

impl ProjectProperties {
    /// Applies the classification rule to these flags.
    #[must_use]
    pub const fn band(&self) -> Band {
        match (self.is_netcoreapp_ref, self.is_netcoreapp) {
            (Some(false), _) | (_, None | Some(false)) => Band::OutOfBand,
            (_, Some(true)) => Band::InBand,
        }
    }
}

/// Whether a module ships with the framework or separately from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// Part of the framework's own reference set; not copied.
    InBand,
    /// Shipped separately; copied into the layout.
    OutOfBand,
}

impl Band {
    #[must_use]
    pub const fn is_out_of_band(self) -> bool {
        matches!(self, Self::OutOfBand)
    }
}

/// The first top-level `<Import>` of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Import {
    /// No `<Import>` element.
    Absent,
    /// `Project=""` or whitespace only.
    Empty,
    /// Relative (or absolute) path to the imported document, as written.
    Path(String),
    /// An `<Import>` element without a `Project` attribute.
    MissingProject,
}

/// Result of looking up a property group along an import chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyLookup {
    Found(ProjectProperties),
    /// The chain ended without a property group.
    NotFound,
}

impl PropertyLookup {
    /// Classification of the lookup; unresolved chains count as out-of-band.
    #[must_use]
    pub const fn band(&self) -> Band {
        match self {
            Self::Found(properties) => properties.band(),
            Self::NotFound => Band::OutOfBand,
        }
    }
}

/// A parsed `.props` document, reduced to what classification needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropsDocument {
    path: PathBuf,
    /// `None` when the document has no top-level `<PropertyGroup>` with
    /// child elements.
    properties: Option<ProjectProperties>,
    import: Import,
}

impl PropsDocument {
    /// Reads and parses a document from disk.
    ///
    /// # Errors
    ///
    /// Returns `FsError::NotFound` if the file does not exist, an I/O error if
    /// it cannot be read, and the errors of [`PropsDocument::parse`].
    pub fn load(path: &Path) -> LayoutResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FsError::NotFound(path.display().to_string())
            } else {
                FsError::io(path, e)
            }
        })?;
        Self::parse(path, &text)
    }

    /// Parses document text; `path` is used for error messages.
    ///
    /// Top-level `<PropertyGroup>` elements are merged in document order, a
    /// later flag overriding an earlier one. Elements are matched by local
    /// name, so the MSBuild 2003 namespace is accepted.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::Xml` for malformed XML and
    /// `ProjectError::InvalidBool` for a flag that is not `true`/`false`.
    pub fn parse(path: &Path, text: &str) -> LayoutResult<Self> {
        let file = path.display().to_string();
        let doc = Document::parse(text).map_err(|e| ProjectError::Xml {
            file: file.clone(),
            message: e.to_string(),
        })?;
        let root = doc.root_element();

        let mut properties: Option<ProjectProperties> = None;
        for group in root
            .children()
            .filter(|node| node.has_tag_name(PROPERTY_GROUP))
        {
            if !group.children().any(|node| node.is_element()) {
                continue;
            }
            let merged = properties.get_or_insert_with(ProjectProperties::default);
            if let Some(value) = read_flag(&file, group, IS_NETCOREAPP_REF)? {
                merged.is_netcoreapp_ref = Some(value);
            }
            if let Some(value) = read_flag(&file, group, IS_NETCOREAPP)? {
                merged.is_netcoreapp = Some(value);
            }
        }

        let import = root
            .children()
            .find(|node| node.has_tag_name(IMPORT))
            .map_or(Import::Absent, |node| match node.attribute("Project") {
                None => Import::MissingProject,
                Some(project) if project.trim().is_empty() => Import::Empty,
                Some(project) => Import::Path(project.trim().to_string()),
            });

        Ok(Self {
            path: path.to_path_buf(),
            properties,
            import,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn properties(&self) -> Option<&ProjectProperties> {
        self.properties.as_ref()
    }

    #[must_use]
    pub const fn import(&self) -> &Import {
        &self.import
    }
}

/// Reads the last `<name>` child of a property group as a boolean.
///
/// Empty elements count as absent.
fn read_flag(file: &str, group: Node<'_, '_>, name: &str) -> LayoutResult<Option<bool>> {
    let Some(text) = group
        .children()
        .filter(|node| node.has_tag_name(name))
        .last()
        .and_then(|node| node.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
    else {
        return Ok(None);
    };

    parse_bool(text).map(Some).ok_or_else(|| {
        ProjectError::InvalidBool {
            file: file.to_string(),
            property: name.to_string(),
            value: text.to_string(),
        }
        .into()
    })
}

/// Parses `true`/`false` case-insensitively.
fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
