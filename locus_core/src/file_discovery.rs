//! File discovery module for finding files based on glob patterns
//!
//! This module collects the absolute paths of files under a set of roots
//! whose base names match a shell glob pattern, without duplicates.

mod collector;
mod filter;

pub use collector::{DEFAULT_PATTERN, FileCollector, find_all};
pub use filter::NamePattern;
