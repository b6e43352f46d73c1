//! On-disk directory trees for collection tests

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Builder for temporary directory trees
///
/// Paths are relative to the tree root and use `/` as separator.
/// Parent directories are created as needed.
#[derive(Debug, Default)]
pub struct TestTreeBuilder {
    files: Vec<(String, String)>,
    directories: Vec<String>,
}

/// A built tree, removed from disk when dropped
#[derive(Debug)]
pub struct TestTree {
    _dir: TempDir,
    root: PathBuf,
}

impl TestTreeBuilder {
    /// Create a new empty tree builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with default content
    pub fn with_file(self, path: &str) -> Self {
        self.with_file_content(path, "# generated for tests\n")
    }

    /// Add a file with the given content
    pub fn with_file_content(mut self, path: &str, content: &str) -> Self {
        self.files.push((path.to_string(), content.to_string()));
        self
    }

    /// Add an empty directory
    pub fn with_directory(mut self, path: &str) -> Self {
        self.directories.push(path.to_string());
        self
    }

    /// Create the tree under a fresh temporary directory
    pub fn build(self) -> io::Result<TestTree> {
        let dir = TempDir::new()?;
        let root = dir.path().canonicalize()?;

        for directory in &self.directories {
            fs::create_dir_all(root.join(directory))?;
        }

        for (path, content) in &self.files {
            let file_path = root.join(path);
            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(file_path, content)?;
        }

        Ok(TestTree { _dir: dir, root })
    }
}

impl TestTree {
    /// Canonical root of the tree
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of `relative` inside the tree
    pub fn path(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |path, part| path.join(part))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_creates_files_and_directories() {
        let tree = TestTreeBuilder::new()
            .with_file("pkg/mod.py")
            .with_file_content("top.py", "x = 1\n")
            .with_directory("empty")
            .build()
            .unwrap();

        assert!(tree.path("pkg/mod.py").is_file());
        assert!(tree.path("empty").is_dir());
        assert_eq!(fs::read_to_string(tree.path("top.py")).unwrap(), "x = 1\n");
    }

    #[test]
    fn test_tree_is_removed_on_drop() {
        let tree = TestTreeBuilder::new().with_file("a.py").build().unwrap();
        let root = tree.root().to_path_buf();

        drop(tree);

        assert!(!root.exists());
    }
}
