//! Materializes a [`PathManifest`] under a project's output root
//!
//! Entries are applied strictly in manifest order. Existing directories and
//! files are left alone, so applying the same manifest again is a no-op.
//! The first filesystem error aborts the run; nothing already created is
//! rolled back.

use std::cell::RefCell;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::ProjectPaths;
use crate::error::{Result, ScaffoldError};
use crate::fs::Filesystem;
use crate::manifest::{ManifestGroup, PathManifest};

/// What happened to a single path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created,
    Existed,
}

/// Result of applying one manifest group
#[derive(Debug, Clone, Default)]
pub struct GroupReport {
    pub name: String,
    pub label: Option<String>,
    pub created_dirs: usize,
    pub created_files: usize,
    pub existing: usize,
}

impl GroupReport {
    fn for_group(group: &ManifestGroup) -> Self {
        Self {
            name: group.name.clone(),
            label: group.label.clone(),
            ..Default::default()
        }
    }
}

/// Result of a complete run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_root: PathBuf,
    pub display_root: String,
    pub dry_run: bool,
    /// Outcome for the output root itself
    pub root: Outcome,
    pub groups: Vec<GroupReport>,
}

impl RunReport {
    pub fn created_dirs(&self) -> usize {
        let root = usize::from(self.root == Outcome::Created);
        root + self.groups.iter().map(|g| g.created_dirs).sum::<usize>()
    }

    pub fn created_files(&self) -> usize {
        self.groups.iter().map(|g| g.created_files).sum()
    }

    pub fn existing(&self) -> usize {
        let root = usize::from(self.root == Outcome::Existed);
        root + self.groups.iter().map(|g| g.existing).sum::<usize>()
    }

    /// True when nothing was (or would be) created
    pub fn is_noop(&self) -> bool {
        self.created_dirs() == 0 && self.created_files() == 0
    }
}

/// Receives a report each time a group has been applied
pub trait ProgressSink {
    fn group_completed(&mut self, report: &GroupReport);
}

impl ProgressSink for () {
    fn group_completed(&mut self, _report: &GroupReport) {}
}

impl ProgressSink for Vec<GroupReport> {
    fn group_completed(&mut self, report: &GroupReport) {
        self.push(report.clone());
    }
}

pub struct Scaffolder<F: Filesystem> {
    fs: F,
    paths: ProjectPaths,
    dry_run: bool,
    /// Directories a dry run has pretended to create, ancestors included
    planned: RefCell<HashSet<PathBuf>>,
}

impl<F: Filesystem> Scaffolder<F> {
    pub fn new(fs: F, paths: ProjectPaths) -> Self {
        Self {
            fs,
            paths,
            dry_run: false,
            planned: RefCell::new(HashSet::new()),
        }
    }

    /// Report what would be created without writing anything
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// True iff the marker file exists directly under the project root
    pub fn check_precondition(&self) -> bool {
        self.fs.is_file(&self.paths.marker)
    }

    /// Whether `path` is a directory, or would be one at this point of a dry run
    fn dir_available(&self, path: &Path) -> bool {
        self.fs.is_dir(path) || self.planned.borrow().contains(path)
    }

    /// Create `path` with its ancestors unless it is already a directory
    pub fn ensure_directory(&self, path: &Path) -> Result<Outcome> {
        if self.dir_available(path) {
            tracing::debug!(path = %path.display(), "directory exists");
            return Ok(Outcome::Existed);
        }
        if self.fs.exists(path) {
            return Err(ScaffoldError::io(
                path,
                io::Error::new(io::ErrorKind::AlreadyExists, "exists and is not a directory"),
            ));
        }

        if self.dry_run {
            tracing::info!(path = %path.display(), "would create directory");
            self.planned
                .borrow_mut()
                .extend(path.ancestors().map(Path::to_path_buf));
        } else {
            self.fs
                .create_dir_all(path)
                .map_err(|e| ScaffoldError::io(path, e))?;
            tracing::debug!(path = %path.display(), "created directory");
        }
        Ok(Outcome::Created)
    }

    /// Create an empty file unless something already exists at `path`.
    /// Existing content is never touched.
    pub fn ensure_file(&self, path: &Path) -> Result<Outcome> {
        if self.fs.exists(path) {
            tracing::debug!(path = %path.display(), "file exists");
            return Ok(Outcome::Existed);
        }

        if self.dry_run {
            // The real create would fail without its parent
            if !path.parent().is_some_and(|p| self.dir_available(p)) {
                return Err(ScaffoldError::io(
                    path,
                    io::Error::new(io::ErrorKind::NotFound, "parent directory does not exist"),
                ));
            }
            tracing::info!(path = %path.display(), "would create file");
            return Ok(Outcome::Created);
        }

        match self.fs.create_empty_file(path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "created file");
                Ok(Outcome::Created)
            }
            // Appeared after the existence check; still not ours to touch
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(Outcome::Existed),
            Err(e) => Err(ScaffoldError::io(path, e)),
        }
    }

    /// Check the precondition, then apply every group in order
    pub fn run(&self, manifest: &PathManifest, sink: &mut dyn ProgressSink) -> Result<RunReport> {
        if !self.check_precondition() {
            let marker = self
                .paths
                .marker
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            return Err(ScaffoldError::Precondition {
                marker,
                root: self.paths.project_root.clone(),
            });
        }

        let _span = tracing::info_span!(
            "scaffold",
            root = %self.paths.output_root.display(),
            dry_run = self.dry_run
        )
        .entered();

        let root = self.ensure_directory(&self.paths.output_root)?;
        let mut groups = Vec::with_capacity(manifest.groups.len());

        for group in &manifest.groups {
            let report = self.apply_group(group)?;
            sink.group_completed(&report);
            groups.push(report);
        }

        let report = RunReport {
            output_root: self.paths.output_root.clone(),
            display_root: self.paths.display_root(),
            dry_run: self.dry_run,
            root,
            groups,
        };
        tracing::info!(
            dirs = report.created_dirs(),
            files = report.created_files(),
            existing = report.existing(),
            "scaffold complete"
        );
        Ok(report)
    }

    fn apply_group(&self, group: &ManifestGroup) -> Result<GroupReport> {
        let mut report = GroupReport::for_group(group);

        for dir in &group.directories {
            match self.ensure_directory(&self.paths.resolve(dir))? {
                Outcome::Created => report.created_dirs += 1,
                Outcome::Existed => report.existing += 1,
            }
        }
        for file in &group.files {
            match self.ensure_file(&self.paths.resolve(file))? {
                Outcome::Created => report.created_files += 1,
                Outcome::Existed => report.existing += 1,
            }
        }

        Ok(report)
    }
}
