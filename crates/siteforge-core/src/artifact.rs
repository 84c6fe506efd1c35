//! The multi-file project artifact and its required-file contract.
//!
//! An [`Artifact`] maps absolute-style file paths (`/src/App.js`) to their
//! [`FileContent`]. Files are kept in a `BTreeMap` so serialization order is
//! stable and two equal artifacts always serialize to identical bytes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Textual content of a single project file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContent {
    pub code: String,
}

impl FileContent {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// The five files every artifact must carry.
///
/// Consumers (editor view, preview sandbox) index the artifact by these exact
/// paths; anything else is an opaque extra project file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredFile {
    /// React application component.
    AppEntry,
    /// Rendering bootstrap that mounts the app.
    BootstrapEntry,
    /// Global stylesheet.
    Stylesheet,
    /// HTML shell served to the browser.
    HtmlShell,
    /// npm package manifest.
    Manifest,
}

impl RequiredFile {
    /// Canonical order, used for missing-file reports and listings.
    pub const ALL: [RequiredFile; 5] = [
        RequiredFile::AppEntry,
        RequiredFile::BootstrapEntry,
        RequiredFile::Stylesheet,
        RequiredFile::HtmlShell,
        RequiredFile::Manifest,
    ];

    pub const fn path(self) -> &'static str {
        match self {
            Self::AppEntry => "/src/App.js",
            Self::BootstrapEntry => "/src/index.js",
            Self::Stylesheet => "/src/styles.css",
            Self::HtmlShell => "/public/index.html",
            Self::Manifest => "/package.json",
        }
    }

    /// Look up the required file for a path, if it is one.
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.path() == path)
    }

    /// All required paths in canonical order.
    pub fn paths() -> impl Iterator<Item = &'static str> {
        Self::ALL.into_iter().map(Self::path)
    }
}

impl fmt::Display for RequiredFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A complete multi-file project keyed by file path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Artifact {
    files: BTreeMap<String, FileContent>,
}

impl Artifact {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a file.
    pub fn insert(&mut self, path: impl Into<String>, code: impl Into<String>) {
        self.files.insert(path.into(), FileContent::new(code));
    }

    /// Builder-style [`Artifact::insert`].
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, code: impl Into<String>) -> Self {
        self.insert(path, code);
        self
    }

    pub fn get(&self, path: &str) -> Option<&FileContent> {
        self.files.get(path)
    }

    /// Code of the file at `path`.
    pub fn code(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(|f| f.code.as_str())
    }

    /// Code of one of the required files.
    pub fn required(&self, file: RequiredFile) -> Option<&str> {
        self.code(file.path())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate `(path, content)` pairs in path order.
    pub fn files(&self) -> impl Iterator<Item = (&str, &FileContent)> {
        self.files.iter().map(|(p, f)| (p.as_str(), f))
    }

    /// Paths that are not part of the required set.
    pub fn extra_paths(&self) -> Vec<&str> {
        self.files
            .keys()
            .map(String::as_str)
            .filter(|p| RequiredFile::from_path(p).is_none())
            .collect()
    }

    /// Pretty JSON in the `{"/path": {"code": "..."}}` wire shape.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl FromIterator<(String, FileContent)> for Artifact {
    fn from_iter<I: IntoIterator<Item = (String, FileContent)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}
