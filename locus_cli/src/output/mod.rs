mod formatters;

pub use formatters::{CsvFormatter, JsonFormatter, TextFormatter, parse_delimiter};

use locus_core::error::IoError;
use locus_core::{
    ExtensionFormatterRegistry, FormatterOptions, Result, split_path_root_file_ext,
    swap_keys_and_values,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A collected file as it appears in reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub name: String,
    pub extension: String,
    pub size: u64,
}

impl DiscoveredFile {
    /// Describe the file at `path`, reading its size from disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let (_, name, extension) = split_path_root_file_ext(&path.to_string_lossy());
        let metadata = fs::metadata(path).map_err(|e| IoError::from_std(e).with_path(path))?;

        Ok(Self {
            path: path.to_path_buf(),
            name,
            extension,
            size: metadata.len(),
        })
    }
}

/// Report format names and the output extension each one is registered under
pub const FORMATS: [(&str, &str); 3] = [("text", ".txt"), ("csv", ".csv"), ("json", ".json")];

/// Extension whose formatter handles outputs with an unregistered extension
pub const FALLBACK_EXTENSION: &str = ".txt";

/// Report format names keyed by output extension
pub fn formats_by_extension() -> Result<HashMap<&'static str, &'static str>> {
    let by_name: HashMap<&str, &str> = FORMATS.into_iter().collect();
    swap_keys_and_values(&by_name)
}

/// Registry of every report formatter, keyed by output extension
pub fn build_registry() -> ExtensionFormatterRegistry<[DiscoveredFile]> {
    let mut registry = ExtensionFormatterRegistry::new();
    for (name, extension) in FORMATS {
        match name {
            "text" => registry.register(extension, TextFormatter::create),
            "csv" => registry.register(extension, CsvFormatter::create),
            "json" => registry.register(extension, JsonFormatter::create),
            _ => log::warn!("No formatter implementation for format '{name}'"),
        }
    }
    registry
}

/// Settings that shape individual reports
#[derive(Debug, Clone, Default)]
pub struct ReportSettings {
    pub leading: Option<String>,
    pub csv_delimiter: String,
    pub json_pretty: bool,
}

/// Construction options for the formatter registered under `extension`
pub fn formatter_options(extension: &str, settings: &ReportSettings) -> FormatterOptions {
    let mut options = FormatterOptions::new();
    match extension {
        ".csv" => {
            options.insert(
                "delimiter".to_string(),
                Value::String(settings.csv_delimiter.clone()),
            );
        }
        ".json" => {
            options.insert("pretty".to_string(), Value::Bool(settings.json_pretty));
        }
        _ => {
            if let Some(leading) = &settings.leading {
                options.insert("leading".to_string(), Value::String(leading.clone()));
            }
        }
    }
    options
}

/// Format bytes as human-readable string
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}
