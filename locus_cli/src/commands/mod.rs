//! Command implementations
//!
//! Each command coordinates between the CLI layer and the core library and
//! returns plain data; printing stays in the binary.

pub mod find;
pub mod report;

pub use find::{FindOptions, find_files};
pub use report::{ReportRequest, ReportSummary, run_report};
