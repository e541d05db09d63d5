//! Declarative path manifest
//!
//! The layout is described as ordered groups of directories and files, all
//! relative to the output root. The built-in Flutter layout is compiled into
//! the binary from `flutter_clean.toml`.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScaffoldError};

const BUILTIN_MANIFEST: &str = include_str!("flutter_clean.toml");

/// Lowercase segments separated by `/`. Dots are allowed inside a segment
/// but a segment can never be `.` or `..`.
static PATH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9_]+(\.[a-z0-9_]+)*(/[a-z0-9_]+(\.[a-z0-9_]+)*)*$")
        .expect("path pattern is a valid regex")
});

/// Kind of filesystem entry to materialize
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    File,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Directory => write!(f, "directory"),
            EntryKind::File => write!(f, "file"),
        }
    }
}

/// A single manifest entry, relative to the output root
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Entry {
    pub kind: EntryKind,
    pub path: String,
}

/// A logical group of entries reported with one progress line
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestGroup {
    pub name: String,

    /// Shown in the progress line. Groups without a label are applied silently.
    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub directories: Vec<String>,

    #[serde(default)]
    pub files: Vec<String>,
}

impl ManifestGroup {
    /// Directories first, then files, in declared order
    pub fn entries(&self) -> impl Iterator<Item = Entry> + '_ {
        let dirs = self.directories.iter().map(|path| Entry {
            kind: EntryKind::Directory,
            path: path.clone(),
        });
        let files = self.files.iter().map(|path| Entry {
            kind: EntryKind::File,
            path: path.clone(),
        });
        dirs.chain(files)
    }
}

/// Ordered sequence of groups to apply under an output root
#[derive(Debug, Clone, Deserialize)]
pub struct PathManifest {
    #[serde(rename = "group", default)]
    pub groups: Vec<ManifestGroup>,
}

impl PathManifest {
    /// The embedded Flutter clean-architecture layout
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_MANIFEST)
    }

    /// Parse and validate a manifest document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let manifest: PathManifest = toml::from_str(content)
            .map_err(|e| ScaffoldError::InvalidManifest(e.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// All entries in application order
    pub fn entries(&self) -> Vec<Entry> {
        self.groups.iter().flat_map(|g| g.entries()).collect()
    }

    pub fn directory_count(&self) -> usize {
        self.groups.iter().map(|g| g.directories.len()).sum()
    }

    pub fn file_count(&self) -> usize {
        self.groups.iter().map(|g| g.files.len()).sum()
    }

    /// Check the structural rules that make a sequential apply safe:
    /// well-formed relative paths, no duplicates, and every file lands in
    /// a directory declared at or before its own group.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let mut declared_dirs: Vec<&str> = Vec::new();

        for group in &self.groups {
            if group.name.trim().is_empty() {
                return Err(invalid("group with empty name"));
            }

            for entry in group.entries() {
                if !PATH_PATTERN.is_match(&entry.path) {
                    return Err(invalid(format!(
                        "{} '{}' in group '{}' is not a plain relative path",
                        entry.kind, entry.path, group.name
                    )));
                }
                if !seen.insert(entry.path.clone()) {
                    return Err(invalid(format!("duplicate path '{}'", entry.path)));
                }
            }

            declared_dirs.extend(group.directories.iter().map(String::as_str));

            for file in &group.files {
                if let Some((parent, _)) = file.rsplit_once('/') {
                    if !declared_dirs.iter().any(|d| covers(d, parent)) {
                        return Err(invalid(format!(
                            "file '{}' has no declared parent directory '{}'",
                            file, parent
                        )));
                    }
                }
            }
        }

        // A file can't also be an ancestor of a directory
        let all_dirs: Vec<&str> = self
            .groups
            .iter()
            .flat_map(|g| g.directories.iter().map(String::as_str))
            .collect();
        for file in self.groups.iter().flat_map(|g| g.files.iter()) {
            if all_dirs.iter().any(|d| is_ancestor(file, d)) {
                return Err(invalid(format!(
                    "file '{}' is also used as a directory",
                    file
                )));
            }
        }

        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> ScaffoldError {
    ScaffoldError::InvalidManifest(msg.into())
}

/// Whether creating `dir` (with its ancestors) also creates `parent`
fn covers(dir: &str, parent: &str) -> bool {
    dir == parent || is_ancestor(parent, dir)
}

fn is_ancestor(ancestor: &str, path: &str) -> bool {
    path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && path.as_bytes()[ancestor.len()] == b'/'
}
