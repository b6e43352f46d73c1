//! Test utilities for locus
//!
//! This crate provides mock implementations and test builders for testing
//! file collection and report writing.

pub mod builders;
pub mod mocks;

// Re-export commonly used types
pub use builders::{TestTree, TestTreeBuilder};
pub use mocks::{FormatterScript, MockFileSystem, RecordingSink, ScriptedFormatter, SinkProbe, Stage};
