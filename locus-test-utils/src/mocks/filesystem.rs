//! Mock file system implementation for testing

use locus_core::platform::{PathClassifier, normalize_lexically};
use locus_core::{Error, Result, error::IoError, flatten};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// In-memory file system for testing file collection
///
/// Directory children are listed in insertion order, which makes traversal
/// order deterministic. Every `list_dir` call is recorded.
pub struct MockFileSystem {
    files: HashSet<PathBuf>,
    directories: HashMap<PathBuf, Vec<OsString>>,
    special: HashSet<PathBuf>,
    failing: HashSet<PathBuf>,
    current_dir: PathBuf,
    listed: RefCell<Vec<PathBuf>>,
}

impl MockFileSystem {
    /// Create a new mock file system containing only the root directory
    pub fn new() -> Self {
        let root = PathBuf::from("/");
        Self {
            files: HashSet::new(),
            directories: HashMap::from([(root.clone(), Vec::new())]),
            special: HashSet::new(),
            failing: HashSet::new(),
            current_dir: root,
            listed: RefCell::new(Vec::new()),
        }
    }

    /// Check if the mock file system holds nothing but the root
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.special.is_empty() && self.directories.len() == 1
    }

    /// Add a file, creating missing parent directories
    pub fn add_file(&mut self, path: &str) -> &mut Self {
        let path = PathBuf::from(path);
        self.attach(&path);
        self.files.insert(path);
        self
    }

    /// Create a directory, creating missing parent directories
    pub fn create_directory(&mut self, path: &str) -> &mut Self {
        let path = PathBuf::from(path);
        if !self.directories.contains_key(&path) {
            self.attach(&path);
            self.directories.insert(path, Vec::new());
        }
        self
    }

    /// Add an entry that is neither a file nor a directory (socket, broken link)
    pub fn add_special(&mut self, path: &str) -> &mut Self {
        let path = PathBuf::from(path);
        self.attach(&path);
        self.special.insert(path);
        self
    }

    /// Make listing `path` fail with a permission error
    pub fn fail_listing(&mut self, path: &str) -> &mut Self {
        self.failing.insert(PathBuf::from(path));
        self
    }

    /// Directory relative paths are resolved against
    pub fn set_current_dir(&mut self, path: &str) -> &mut Self {
        self.current_dir = PathBuf::from(path);
        self
    }

    /// Directories listed so far, in call order
    pub fn listed_directories(&self) -> Vec<PathBuf> {
        self.listed.borrow().clone()
    }

    /// Every path in the mock, depth-first from the root
    pub fn all_paths(&self) -> Vec<PathBuf> {
        flatten(PathBuf::from("/"), |path| {
            self.directories
                .get(path)
                .map(|names| names.iter().map(|name| path.join(name)).collect())
                .unwrap_or_else(Vec::new)
        })
        .collect()
    }

    /// Reset the mock file system
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn attach(&mut self, path: &Path) {
        let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
            return;
        };

        if let Some(parent) = parent.to_str() {
            self.create_directory(parent);
        }

        let children = self.directories.entry(parent.to_path_buf()).or_default();
        if !children.iter().any(|child| child == name) {
            children.push(name.to_os_string());
        }
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl PathClassifier for MockFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.directories.contains_key(path)
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<OsString>> {
        self.listed.borrow_mut().push(path.to_path_buf());

        if self.failing.contains(path) {
            let source = io::Error::new(io::ErrorKind::PermissionDenied, "listing denied");
            return Err(Error::Io(IoError::permission_denied(path, source)));
        }

        self.directories
            .get(path)
            .cloned()
            .ok_or_else(|| Error::Io(IoError::file_not_found(path)))
    }

    fn absolute(&self, path: &Path) -> Result<PathBuf> {
        if path.has_root() {
            Ok(normalize_lexically(path))
        } else {
            Ok(normalize_lexically(&self.current_dir.join(path)))
        }
    }
}
