//! `locus report`: write collected files to one or more report outputs

use crate::output::{
    DiscoveredFile, FALLBACK_EXTENSION, ReportSettings, build_registry, formatter_options,
};
use locus_core::{
    AggregateError, Error, ExtensionFormatterRegistry, Result, find_all, split_path_root_file_ext,
    write_report,
};
use std::path::{Path, PathBuf};

/// What to collect and where to write it
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub paths: Vec<PathBuf>,
    pub pattern: String,
    pub outputs: Vec<PathBuf>,
    pub settings: ReportSettings,
}

/// Outcome of a fully successful report run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub files: usize,
    pub written: Vec<PathBuf>,
}

/// Collect files and write every requested output
///
/// Every output is attempted even when an earlier one fails. If any fail,
/// their errors are returned together as an [`AggregateError`].
pub fn run_report(request: &ReportRequest) -> Result<ReportSummary> {
    let files = find_all(&request.paths, &request.pattern)?
        .iter()
        .map(|path| DiscoveredFile::from_path(path))
        .collect::<Result<Vec<_>>>()?;

    let registry = build_registry();
    let mut written = Vec::new();
    let mut failures = Vec::new();

    for output in &request.outputs {
        match write_output(&registry, output, &files, &request.settings) {
            Ok(()) => written.push(output.clone()),
            Err(error) => {
                log::warn!("Failed to write report {}: {error}", output.display());
                failures.push(error);
            }
        }
    }

    if !failures.is_empty() {
        return Err(AggregateError::from_errors(failures).into());
    }

    Ok(ReportSummary {
        files: files.len(),
        written,
    })
}

fn write_output(
    registry: &ExtensionFormatterRegistry<[DiscoveredFile]>,
    output: &Path,
    files: &[DiscoveredFile],
    settings: &ReportSettings,
) -> Result<()> {
    let (_, _, extension) = split_path_root_file_ext(&output.to_string_lossy());
    let extension = extension.to_lowercase();

    let options = formatter_options(&extension, settings);
    let factory = match registry.get_formatter_factory(&extension, options) {
        Some(factory) => factory,
        None => {
            log::warn!(
                "No formatter registered for '{extension}', writing {} as {FALLBACK_EXTENSION}",
                output.display()
            );
            registry
                .get_formatter_factory(
                    FALLBACK_EXTENSION,
                    formatter_options(FALLBACK_EXTENSION, settings),
                )
                .ok_or_else(|| Error::missing_dependency("report output", "a text formatter"))?
        }
    };

    write_report(output, files, factory)
}
