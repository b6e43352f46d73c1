//! Mock implementations for testing

mod filesystem;
mod formatter;
mod sink;

pub use filesystem::MockFileSystem;
pub use formatter::{FormatterScript, ScriptedFormatter, Stage};
pub use sink::{RecordingSink, SinkProbe};
