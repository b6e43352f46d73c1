//! Path classification and normalization
//!
//! The file collector never touches `std::fs` directly. It asks a
//! [`PathClassifier`] whether something is a file or a directory, what a
//! directory contains and what a path looks like in absolute form, so tests
//! can swap the host filesystem for an in-memory one.

use crate::{Result, error::IoError};
use std::ffi::OsString;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Filesystem questions asked during file collection
pub trait PathClassifier {
    /// True if `path` exists and is a regular file (symlinks are followed)
    fn is_file(&self, path: &Path) -> bool;

    /// True if `path` exists and is a directory (symlinks are followed)
    fn is_dir(&self, path: &Path) -> bool;

    /// Names of the direct children of `path`, in enumeration order
    fn list_dir(&self, path: &Path) -> Result<Vec<OsString>>;

    /// Absolute, lexically normalized form of `path`
    fn absolute(&self, path: &Path) -> Result<PathBuf>;
}

impl<T: PathClassifier + ?Sized> PathClassifier for &T {
    fn is_file(&self, path: &Path) -> bool {
        (**self).is_file(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<OsString>> {
        (**self).list_dir(path)
    }

    fn absolute(&self, path: &Path) -> Result<PathBuf> {
        (**self).absolute(path)
    }
}

/// [`PathClassifier`] backed by the host filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFileSystem;

impl PathClassifier for HostFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<OsString>> {
        let entries = fs::read_dir(path).map_err(|e| io_error_at(path, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_error_at(path, e))?;
            names.push(entry.file_name());
        }

        Ok(names)
    }

    fn absolute(&self, path: &Path) -> Result<PathBuf> {
        let absolute = std::path::absolute(path).map_err(|e| io_error_at(path, e))?;
        Ok(normalize_lexically(&absolute))
    }
}

fn io_error_at(path: &Path, error: std::io::Error) -> IoError {
    match error.kind() {
        std::io::ErrorKind::PermissionDenied => IoError::permission_denied(path, error),
        _ => IoError::from_std(error).with_path(path),
    }
}

/// Collapse `.` and `..` components without consulting the filesystem
///
/// Symlinks are not resolved, so `link/..` becomes the directory holding
/// `link`. A `..` directly under the root stays at the root.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component),
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(component),
            },
            Component::Normal(part) => normalized.push(part),
        }
    }

    normalized
}

/// Replace the alternate separator with the platform separator
///
/// Only Windows has an alternate separator (`/`). Elsewhere `\` is an
/// ordinary file name character and the path is returned unchanged.
pub fn normalize_separators(path: &str) -> String {
    #[cfg(windows)]
    {
        path.replace('/', "\\")
    }

    #[cfg(not(windows))]
    {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_host_classifies_files_and_directories() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.py");
        fs::write(&file, b"x = 1").unwrap();

        let host = HostFileSystem;
        assert!(host.is_file(&file));
        assert!(!host.is_dir(&file));
        assert!(host.is_dir(dir.path()));
        assert!(!host.is_file(dir.path()));

        let missing = dir.path().join("missing.py");
        assert!(!host.is_file(&missing));
        assert!(!host.is_dir(&missing));
    }

    #[test]
    fn test_host_lists_direct_children_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.py"), b"").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("b.py"), b"").unwrap();

        let mut names = HostFileSystem.list_dir(dir.path()).unwrap();
        names.sort();

        assert_eq!(names, vec![OsString::from("a.py"), OsString::from("sub")]);
    }

    #[test]
    fn test_host_list_missing_directory_fails_with_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let error = HostFileSystem.list_dir(&missing).unwrap_err();
        assert!(error.to_string().contains("nope"));
    }

    #[test]
    fn test_absolute_is_rooted_and_normalized() {
        let absolute = HostFileSystem
            .absolute(Path::new("src/./nested/../lib.rs"))
            .unwrap();

        assert!(absolute.is_absolute());
        assert!(absolute.ends_with("src/lib.rs"));
    }

    #[cfg(not(windows))]
    #[test]
    fn test_normalize_lexically() {
        assert_eq!(
            normalize_lexically(Path::new("/a/b/../c/./d")),
            PathBuf::from("/a/c/d")
        );
        assert_eq!(normalize_lexically(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(normalize_lexically(Path::new("a//b/")), PathBuf::from("a/b"));
        assert_eq!(normalize_lexically(Path::new("../a")), PathBuf::from("../a"));
    }

    #[cfg(not(windows))]
    #[test]
    fn test_backslash_is_kept_on_unix() {
        assert_eq!(normalize_separators("src\\pkg\\mod.py"), "src\\pkg\\mod.py");
        assert_eq!(normalize_separators("src/pkg"), "src/pkg");
    }

    #[cfg(windows)]
    #[test]
    fn test_forward_slashes_become_backslashes_on_windows() {
        assert_eq!(normalize_separators("src/pkg/mod.py"), "src\\pkg\\mod.py");
    }
}
