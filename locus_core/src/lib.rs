//! Locus Core Library
//!
//! Infrastructure for code-metrics tooling: recursive, deduplicating
//! discovery of source files, the report formatter contract with its
//! extension registry and writer, and a few path and map helpers.

pub mod error;
pub mod file_discovery;
pub mod platform;
pub mod report;
pub mod util;

// Re-export main types
pub use error::{AggregateError, CapturedFailure, Error, Result};
pub use file_discovery::{DEFAULT_PATTERN, FileCollector, NamePattern, find_all};
pub use platform::{HostFileSystem, PathClassifier};
pub use report::{
    BoxedSink, ExtensionFormatterRegistry, FormatterConstructor, FormatterFactory,
    FormatterOptions, ReportFormatter, ReportSink, write_report, write_report_to,
};
pub use util::{flatten, prettify_path, split_path_root_file_ext, swap_keys_and_values};
