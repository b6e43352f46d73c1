//! Platform Abstraction Layer
//!
//! Keeps host filesystem access behind the [`PathClassifier`] seam so the
//! collection logic stays independent of `std::fs`.

pub mod path_handling;

// Re-export main types for convenience
pub use path_handling::{
    HostFileSystem, PathClassifier, normalize_lexically, normalize_separators,
};
