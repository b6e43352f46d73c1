//! Driving a formatter through the report lifecycle

use super::{BoxedSink, ReportFormatter};
use crate::{Error, Result, error::IoError};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write `data` to the file at `destination` using the formatter built by `formatter_factory`
///
/// The file is truncated (or created) and handed to the factory as a
/// buffered sink. See [`write_report_to`] for the lifecycle guarantees.
pub fn write_report<D, F>(
    destination: impl AsRef<Path>,
    data: &D,
    formatter_factory: F,
) -> Result<()>
where
    D: ?Sized,
    F: FnOnce(BoxedSink) -> Result<Box<dyn ReportFormatter<D>>>,
{
    let destination = destination.as_ref();
    log::debug!("Writing report to {}", destination.display());

    let file = File::create(destination).map_err(|e| IoError::from_std(e).with_path(destination))?;

    write_report_to(Box::new(BufWriter::new(file)), data, formatter_factory).map_err(|error| {
        match error {
            Error::Io(io) if io.path.is_none() => Error::Io(io.with_path(destination)),
            other => other,
        }
    })
}

/// Write `data` to `sink` using the formatter built by `formatter_factory`
///
/// Stages run strictly in order: header, data, footer. The sink is closed
/// once afterwards whether or not a stage failed. The first stage failure
/// is returned; a close failure is returned only when every stage succeeded.
/// If the factory fails, the sink it consumed has already been dropped.
pub fn write_report_to<D, F>(sink: BoxedSink, data: &D, formatter_factory: F) -> Result<()>
where
    D: ?Sized,
    F: FnOnce(BoxedSink) -> Result<Box<dyn ReportFormatter<D>>>,
{
    let mut formatter = formatter_factory(sink)?;

    let outcome = run_stages(formatter.as_mut(), data);
    let closed = formatter.outstream().close();

    match (outcome, closed) {
        (Err(error), Err(close_error)) => {
            log::warn!("Failed to close report sink after an earlier failure: {close_error}");
            Err(error)
        }
        (Err(error), Ok(())) => Err(error),
        (Ok(()), closed) => closed.map_err(Error::from),
    }
}

fn run_stages<D: ?Sized>(formatter: &mut dyn ReportFormatter<D>, data: &D) -> Result<()> {
    formatter.format_report_header()?;
    formatter.format_data(data)?;
    formatter.format_report_footer()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportSink;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;

    struct LinesFormatter {
        sink: BoxedSink,
    }

    impl ReportFormatter<[&str]> for LinesFormatter {
        fn outstream(&mut self) -> &mut dyn ReportSink {
            self.sink.as_mut()
        }

        fn format_report_header(&mut self) -> Result<()> {
            writeln!(self.sink, "# header")?;
            Ok(())
        }

        fn format_data(&mut self, data: &[&str]) -> Result<()> {
            for line in data {
                writeln!(self.sink, "{line}")?;
            }
            Ok(())
        }

        fn format_report_footer(&mut self) -> Result<()> {
            writeln!(self.sink, "# footer")?;
            Ok(())
        }
    }

    fn lines_factory(sink: BoxedSink) -> Result<Box<dyn ReportFormatter<[&'static str]>>> {
        Ok(Box::new(LinesFormatter { sink }))
    }

    #[test]
    fn test_writes_header_data_footer_in_order() {
        let dir = TempDir::new().unwrap();
        let destination = dir.path().join("report.txt");

        write_report(&destination, &["a.py", "b.py"][..], lines_factory).unwrap();

        assert_eq!(
            fs::read_to_string(&destination).unwrap(),
            "# header\na.py\nb.py\n# footer\n"
        );
    }

    #[test]
    fn test_existing_report_is_truncated() {
        let dir = TempDir::new().unwrap();
        let destination = dir.path().join("report.txt");
        fs::write(&destination, "stale content that is much longer than the report\n").unwrap();

        write_report(&destination, &[][..], lines_factory).unwrap();

        assert_eq!(
            fs::read_to_string(&destination).unwrap(),
            "# header\n# footer\n"
        );
    }

    #[test]
    fn test_unwritable_destination_reports_path() {
        let dir = TempDir::new().unwrap();
        let destination = dir.path().join("missing-dir").join("report.txt");

        let error = write_report(&destination, &[][..], lines_factory).unwrap_err();

        assert!(matches!(error, Error::Io(_)));
        assert!(error.to_string().contains("missing-dir"));
    }

    #[test]
    fn test_factory_failure_propagates() {
        let result = write_report_to(Box::new(Vec::new()), "data", |_sink| {
            Err::<Box<dyn ReportFormatter<str>>, _>(Error::missing_dependency(
                "reports",
                "a renderer",
            ))
        });

        assert!(matches!(result, Err(Error::MissingDependency { .. })));
    }
}
