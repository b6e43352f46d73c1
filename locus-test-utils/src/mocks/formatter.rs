//! Scripted report formatter

use locus_core::{
    BoxedSink, Error, FormatterConstructor, FormatterOptions, ReportFormatter, ReportSink, Result,
};
use std::fmt::Debug;
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Report lifecycle stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Header,
    Data,
    Footer,
}

impl Stage {
    fn label(self) -> &'static str {
        match self {
            Stage::Header => "header",
            Stage::Data => "data",
            Stage::Footer => "footer",
        }
    }
}

/// Formatter that logs each stage it runs and can fail on demand
///
/// Output is one line per stage: `header`, the data's `Debug` form, and
/// `footer`.
pub struct ScriptedFormatter {
    sink: BoxedSink,
    fail_at: Option<Stage>,
    stages: Arc<Mutex<Vec<Stage>>>,
}

/// Shared configuration and call log for [`ScriptedFormatter`]s
#[derive(Debug, Clone, Default)]
pub struct FormatterScript {
    fail_at: Option<Stage>,
    stages: Arc<Mutex<Vec<Stage>>>,
    options_seen: Arc<Mutex<Vec<FormatterOptions>>>,
}

impl FormatterScript {
    /// Script in which every stage succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Script that fails when `stage` runs
    pub fn failing_at(stage: Stage) -> Self {
        Self {
            fail_at: Some(stage),
            ..Self::default()
        }
    }

    /// Build a formatter around `sink` following this script
    pub fn formatter(&self, sink: BoxedSink) -> ScriptedFormatter {
        ScriptedFormatter {
            sink,
            fail_at: self.fail_at,
            stages: Arc::clone(&self.stages),
        }
    }

    /// Constructor suitable for registering in an extension registry
    pub fn constructor<D>(&self) -> FormatterConstructor<D>
    where
        D: ?Sized + Debug + 'static,
    {
        let script = self.clone();
        Arc::new(
            move |sink: BoxedSink,
                  options: &FormatterOptions|
                  -> Result<Box<dyn ReportFormatter<D>>> {
                lock(&script.options_seen).push(options.clone());
                Ok(Box::new(script.formatter(sink)))
            },
        )
    }

    /// Stages run so far, across every formatter built from this script
    pub fn stages(&self) -> Vec<Stage> {
        lock(&self.stages).clone()
    }

    /// Options each constructed formatter received
    pub fn options_seen(&self) -> Vec<FormatterOptions> {
        lock(&self.options_seen).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ScriptedFormatter {
    fn run(&mut self, stage: Stage, line: &str) -> Result<()> {
        lock(&self.stages).push(stage);
        if self.fail_at == Some(stage) {
            return Err(Error::format(
                "scripted",
                format!("failure injected at {}", stage.label()),
            ));
        }
        writeln!(self.sink, "{line}")?;
        Ok(())
    }
}

impl<D: ?Sized + Debug> ReportFormatter<D> for ScriptedFormatter {
    fn outstream(&mut self) -> &mut dyn ReportSink {
        self.sink.as_mut()
    }

    fn format_report_header(&mut self) -> Result<()> {
        self.run(Stage::Header, "header")
    }

    fn format_data(&mut self, data: &D) -> Result<()> {
        self.run(Stage::Data, &format!("{data:?}"))
    }

    fn format_report_footer(&mut self) -> Result<()> {
        self.run(Stage::Footer, "footer")
    }
}
