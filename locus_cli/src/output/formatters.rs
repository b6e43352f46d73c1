use super::{DiscoveredFile, format_bytes};
use locus_core::error::ValidationError;
use locus_core::{
    BoxedSink, Error, FormatterOptions, ReportFormatter, ReportSink, Result, prettify_path,
};
use serde_json::Value;
use std::io::Write;

/// Text formatter for human-readable reports
pub struct TextFormatter {
    sink: BoxedSink,
    leading: Option<String>,
    count: usize,
    total_size: u64,
}

impl TextFormatter {
    pub fn new(sink: BoxedSink, leading: Option<String>) -> Self {
        Self {
            sink,
            leading,
            count: 0,
            total_size: 0,
        }
    }

    /// Build from registry options; `leading` shortens paths through `prettify_path`
    pub fn create(
        sink: BoxedSink,
        options: &FormatterOptions,
    ) -> Result<Box<dyn ReportFormatter<[DiscoveredFile]>>> {
        let leading = string_option(options, "leading")?;
        Ok(Box::new(Self::new(sink, leading)))
    }

    fn display(&self, file: &DiscoveredFile) -> Result<String> {
        let path = file.path.to_string_lossy();
        match &self.leading {
            Some(leading) => Ok(format!(
                "{}{}",
                prettify_path(&path, Some(leading))?,
                file.extension
            )),
            None => Ok(path.into_owned()),
        }
    }
}

impl ReportFormatter<[DiscoveredFile]> for TextFormatter {
    fn outstream(&mut self) -> &mut dyn ReportSink {
        self.sink.as_mut()
    }

    fn format_report_header(&mut self) -> Result<()> {
        writeln!(self.sink, "Discovered files")?;
        writeln!(self.sink, "================")?;
        Ok(())
    }

    fn format_data(&mut self, data: &[DiscoveredFile]) -> Result<()> {
        for file in data {
            let display = self.display(file)?;
            writeln!(self.sink, "{display}  {}", format_bytes(file.size))?;
            self.count += 1;
            self.total_size += file.size;
        }
        Ok(())
    }

    fn format_report_footer(&mut self) -> Result<()> {
        writeln!(self.sink)?;
        writeln!(
            self.sink,
            "{} file(s), {}",
            self.count,
            format_bytes(self.total_size)
        )?;
        Ok(())
    }
}

/// CSV formatter, one record per file
pub struct CsvFormatter {
    sink: BoxedSink,
    delimiter: u8,
}

impl CsvFormatter {
    const HEADERS: [&'static str; 4] = ["path", "name", "extension", "size"];

    pub fn new(sink: BoxedSink, delimiter: u8) -> Self {
        Self { sink, delimiter }
    }

    /// Build from registry options; `delimiter` must be a single ASCII character
    pub fn create(
        sink: BoxedSink,
        options: &FormatterOptions,
    ) -> Result<Box<dyn ReportFormatter<[DiscoveredFile]>>> {
        let delimiter = match string_option(options, "delimiter")? {
            None => b',',
            Some(delimiter) => parse_delimiter(&delimiter)?,
        };
        Ok(Box::new(Self::new(sink, delimiter)))
    }

    fn write_records<I, R>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator,
        R::Item: AsRef<[u8]>,
    {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .from_writer(&mut self.sink);

        for record in records {
            writer
                .write_record(record)
                .map_err(|e| Error::format("csv", e))?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Validate a CSV delimiter given as text
pub fn parse_delimiter(delimiter: &str) -> Result<u8> {
    match delimiter.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(ValidationError::invalid_option(
            "delimiter",
            &format!("expected a single ASCII character, got '{delimiter}'"),
        )
        .into()),
    }
}

impl ReportFormatter<[DiscoveredFile]> for CsvFormatter {
    fn outstream(&mut self) -> &mut dyn ReportSink {
        self.sink.as_mut()
    }

    fn format_report_header(&mut self) -> Result<()> {
        self.write_records([Self::HEADERS])
    }

    fn format_data(&mut self, data: &[DiscoveredFile]) -> Result<()> {
        let records: Vec<[String; 4]> = data
            .iter()
            .map(|file| {
                [
                    file.path.to_string_lossy().into_owned(),
                    file.name.clone(),
                    file.extension.clone(),
                    file.size.to_string(),
                ]
            })
            .collect();
        self.write_records(records)
    }
}

/// JSON formatter writing a single array of file objects
///
/// The header opens the array and the footer closes it, so a report cut
/// short by a failing stage is visibly truncated.
pub struct JsonFormatter {
    sink: BoxedSink,
    pretty: bool,
    written: usize,
}

impl JsonFormatter {
    pub fn new(sink: BoxedSink, pretty: bool) -> Self {
        Self {
            sink,
            pretty,
            written: 0,
        }
    }

    /// Build from registry options; `pretty` must be a boolean
    pub fn create(
        sink: BoxedSink,
        options: &FormatterOptions,
    ) -> Result<Box<dyn ReportFormatter<[DiscoveredFile]>>> {
        let pretty = match options.get("pretty") {
            None => false,
            Some(Value::Bool(pretty)) => *pretty,
            Some(other) => {
                return Err(ValidationError::invalid_option(
                    "pretty",
                    &format!("expected a boolean, got {other}"),
                )
                .into());
            }
        };
        Ok(Box::new(Self::new(sink, pretty)))
    }

    fn encode(&self, file: &DiscoveredFile) -> Result<String> {
        let encoded = if self.pretty {
            serde_json::to_string_pretty(file).map(|json| json.replace('\n', "\n  "))
        } else {
            serde_json::to_string(file)
        };
        encoded.map_err(|e| Error::format("json", e))
    }
}

impl ReportFormatter<[DiscoveredFile]> for JsonFormatter {
    fn outstream(&mut self) -> &mut dyn ReportSink {
        self.sink.as_mut()
    }

    fn format_report_header(&mut self) -> Result<()> {
        write!(self.sink, "[")?;
        Ok(())
    }

    fn format_data(&mut self, data: &[DiscoveredFile]) -> Result<()> {
        for file in data {
            let encoded = self.encode(file)?;
            let separator = if self.written == 0 { "" } else { "," };
            if self.pretty {
                write!(self.sink, "{separator}\n  {encoded}")?;
            } else {
                write!(self.sink, "{separator}{encoded}")?;
            }
            self.written += 1;
        }
        Ok(())
    }

    fn format_report_footer(&mut self) -> Result<()> {
        if self.pretty && self.written > 0 {
            writeln!(self.sink, "\n]")?;
        } else {
            writeln!(self.sink, "]")?;
        }
        Ok(())
    }
}

fn string_option(options: &FormatterOptions, key: &str) -> Result<Option<String>> {
    match options.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(other) => Err(ValidationError::invalid_option(
            key,
            &format!("expected a string, got {other}"),
        )
        .into()),
    }
}
