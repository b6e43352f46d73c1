//! Recursive, deduplicating file collection
//!
//! Walks a working set of paths in two passes per level: first the files
//! of the set are matched and recorded, then every directory of the set is
//! listed and its children become the next working set. A file is recorded
//! only the first time its absolute path is seen, so overlapping roots never
//! produce duplicates. Directories themselves are not deduplicated: a
//! directory reachable twice is listed twice.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::filter::NamePattern;
use crate::Result;
use crate::platform::{HostFileSystem, PathClassifier};

/// Pattern used when the caller does not provide one
pub const DEFAULT_PATTERN: &str = "*.py";

/// Collects matching files below a set of roots
#[derive(Debug, Clone)]
pub struct FileCollector<C = HostFileSystem> {
    pattern: NamePattern,
    classifier: C,
}

impl FileCollector<HostFileSystem> {
    /// Create a collector over the host filesystem
    pub fn new(pattern: &str) -> Result<Self> {
        Self::with_classifier(pattern, HostFileSystem)
    }
}

impl<C: PathClassifier> FileCollector<C> {
    /// Create a collector that asks `classifier` about paths
    pub fn with_classifier(pattern: &str, classifier: C) -> Result<Self> {
        Ok(Self {
            pattern: NamePattern::new(pattern)?,
            classifier,
        })
    }

    /// Pattern this collector matches base names against
    pub fn pattern(&self) -> &str {
        self.pattern.pattern()
    }

    /// Absolute paths of all matching files in and below `roots`
    ///
    /// Roots may be files or directories. Results are distinct and in
    /// first-discovery order. Paths that are neither a file nor a directory
    /// are skipped; errors listing a directory abort the collection.
    pub fn collect<P: AsRef<Path>>(&self, roots: &[P]) -> Result<Vec<PathBuf>> {
        let roots = roots
            .iter()
            .map(|root| self.classifier.absolute(root.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "Collecting files matching '{}' under {} root(s)",
            self.pattern(),
            roots.len()
        );

        let mut state = CollectionState::default();
        self.collect_level(&roots, &mut state)?;

        log::debug!("Collected {} file(s)", state.files.len());
        Ok(state.files)
    }

    fn collect_level(&self, paths: &[PathBuf], state: &mut CollectionState) -> Result<()> {
        for path in paths.iter().filter(|p| self.classifier.is_file(p)) {
            if self.pattern.matches(path) {
                state.record(path);
            }
        }

        for dir in paths.iter().filter(|p| self.classifier.is_dir(p)) {
            let children: Vec<PathBuf> = self
                .classifier
                .list_dir(dir)?
                .into_iter()
                .map(|name| dir.join(name))
                .collect();

            log::trace!("Descending into {} ({} entries)", dir.display(), children.len());
            self.collect_level(&children, state)?;
        }

        Ok(())
    }
}

/// Ordered result list plus its membership set
#[derive(Debug, Default)]
struct CollectionState {
    files: Vec<PathBuf>,
    seen: HashSet<PathBuf>,
}

impl CollectionState {
    fn record(&mut self, path: &Path) {
        if self.seen.insert(path.to_path_buf()) {
            self.files.push(path.to_path_buf());
        } else {
            log::trace!("Skipping already collected {}", path.display());
        }
    }
}

/// Absolute paths of all files in and below `roots` whose base name matches `pattern`
///
/// Convenience wrapper around [`FileCollector`] on the host filesystem.
pub fn find_all<P: AsRef<Path>>(roots: &[P], pattern: &str) -> Result<Vec<PathBuf>> {
    FileCollector::new(pattern)?.collect(roots)
}
