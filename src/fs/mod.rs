//! Filesystem access used by the scaffolder
//!
//! All reads and writes go through [`Filesystem`] so a run can be observed
//! or made to fail in tests without touching permissions on the host.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

pub trait Filesystem {
    fn is_file(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn exists(&self, path: &Path) -> bool;

    /// Create `path` and any missing ancestors
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create a zero-length file. Must fail if `path` already exists.
    fn create_empty_file(&self, path: &Path) -> io::Result<()>;
}

/// The real, local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl Filesystem for LocalFilesystem {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn exists(&self, path: &Path) -> bool {
        // symlink_metadata so a dangling link still counts as present
        fs::symlink_metadata(path).is_ok()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn create_empty_file(&self, path: &Path) -> io::Result<()> {
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map(|_| ())
    }
}

impl<F: Filesystem + ?Sized> Filesystem for &F {
    fn is_file(&self, path: &Path) -> bool {
        (**self).is_file(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        (**self).create_dir_all(path)
    }

    fn create_empty_file(&self, path: &Path) -> io::Result<()> {
        (**self).create_empty_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_empty_file_never_truncates() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("main.dart");
        fs::write(&path, "void main() {}").unwrap();

        let err = LocalFilesystem.create_empty_file(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read_to_string(&path).unwrap(), "void main() {}");
    }

    #[test]
    fn test_create_empty_file_requires_parent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing/main.dart");
        assert!(LocalFilesystem.create_empty_file(&path).is_err());
    }

    #[test]
    fn test_create_dir_all_is_repeatable() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a/b/c");
        LocalFilesystem.create_dir_all(&path).unwrap();
        LocalFilesystem.create_dir_all(&path).unwrap();
        assert!(LocalFilesystem.is_dir(&path));
    }
}
