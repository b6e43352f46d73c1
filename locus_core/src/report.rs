//! Report emission
//!
//! A report is written by a [`ReportFormatter`] that owns its output sink.
//! [`write_report`] opens the sink, builds the formatter through a factory
//! and drives the header, data and footer stages. Formatters are usually
//! looked up by file extension in an [`ExtensionFormatterRegistry`].

mod registry;
mod writer;

pub use registry::{ExtensionFormatterRegistry, FormatterConstructor, FormatterOptions};
pub use writer::{write_report, write_report_to};

use crate::Result;
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Writable destination owned by a formatter
///
/// `close` flushes buffered output and releases the destination. It is
/// called exactly once by the report writer, after the last stage ran.
pub trait ReportSink: Write {
    fn close(&mut self) -> io::Result<()>;
}

/// Type-erased sink handed to formatter factories
pub type BoxedSink = Box<dyn ReportSink>;

// The file handle itself is released when the formatter holding it drops.
impl ReportSink for File {
    fn close(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl ReportSink for BufWriter<File> {
    fn close(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl ReportSink for Vec<u8> {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Trait for report formatters
///
/// `D` is the data a formatter renders. Stages are called in the order
/// header, data, footer, each writing to [`outstream`](Self::outstream).
pub trait ReportFormatter<D: ?Sized> {
    /// Sink the formatter was constructed with
    fn outstream(&mut self) -> &mut dyn ReportSink;

    /// Write whatever belongs at the top of the report
    fn format_report_header(&mut self) -> Result<()>;

    /// Write the report body
    fn format_data(&mut self, data: &D) -> Result<()>;

    /// Write whatever belongs at the bottom of the report. Usually nothing.
    fn format_report_footer(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Builds a ready formatter around a sink
pub type FormatterFactory<D> =
    Box<dyn FnOnce(BoxedSink) -> Result<Box<dyn ReportFormatter<D>>>>;
