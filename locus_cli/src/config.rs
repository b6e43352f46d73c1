use crate::error::{CliError, CliResult, ErrorContext};
use crate::output::parse_delimiter;
use crate::paths;
use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use locus_core::{DEFAULT_PATTERN, NamePattern};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct DiscoveryConfig {
    /// Glob matched against file base names
    pub pattern: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ReportConfig {
    /// Prefix stripped from paths in text reports; empty means no stripping
    pub leading: String,
    pub csv_delimiter: String,
    pub json_pretty: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    pub color_enabled: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            leading: String::new(),
            csv_delimiter: ",".to_string(),
            json_pretty: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color_enabled: true,
        }
    }
}

/// Every key `config get` and `config set` accept
pub const CONFIG_KEYS: [&str; 5] = [
    "discovery.pattern",
    "output.color_enabled",
    "report.csv_delimiter",
    "report.json_pretty",
    "report.leading",
];

impl AppConfig {
    /// Apply CLI argument overrides to the configuration
    pub fn apply_cli_overrides(&mut self, pattern: Option<String>, leading: Option<String>) {
        if let Some(pattern) = pattern {
            self.discovery.pattern = pattern;
        }
        if let Some(leading) = leading {
            self.report.leading = leading;
        }
    }
}

/// Configuration manager that handles XDG-compliant paths and layered configuration
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Create a new ConfigManager with default XDG-compliant paths
    pub fn new() -> Self {
        Self {
            config_path: paths::get_config_path(),
        }
    }

    /// Create a ConfigManager with a specific path (for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn get_config_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    /// Load configuration with layered priority: ENV > File > Defaults
    ///
    /// CLI flags are applied afterwards with [`AppConfig::apply_cli_overrides`].
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new();

        // Layer 1: Defaults
        figment = figment.merge(Serialized::defaults(AppConfig::default()));

        // Layer 2: Config file (if exists)
        if self.config_path.exists() {
            log::debug!("Loading configuration from {}", self.config_path.display());
            figment = figment.merge(Toml::file(&self.config_path));
        }

        // Layer 3: Environment variables
        figment = figment.merge(Env::prefixed("LOCUS_").split("__"));

        figment.extract().context("Failed to load configuration")
    }

    /// Get a configuration value by key (dot notation)
    pub fn get(&self, key: &str) -> CliResult<String> {
        ensure_known_key(key)?;

        self.list()?
            .into_iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
            .ok_or_else(|| CliError::general(&format!("Key '{key}' has no value")))
    }

    /// Set a configuration value by key (dot notation) in the configuration file
    pub fn set(&self, key: &str, value: &str) -> CliResult<()> {
        ensure_known_key(key)?;
        let parsed = parse_config_value(key, value)?;

        let mut config = if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)
                .map_err(|e| CliError::from_io_error(e, &self.config_path.display().to_string()))?;
            toml::from_str(&content)
                .with_context(|| format!("Invalid TOML in {}", self.config_path.display()))?
        } else {
            toml::Table::new()
        };

        let (section, field) = key
            .split_once('.')
            .ok_or_else(|| CliError::misuse(&format!("Invalid key path: {key}")))?;

        match config
            .entry(section)
            .or_insert(toml::Value::Table(toml::Table::new()))
        {
            toml::Value::Table(table) => {
                table.insert(field.to_string(), parsed);
            }
            _ => {
                return Err(CliError::general(&format!(
                    "Cannot set '{key}': '{section}' is not a table"
                )));
            }
        }

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| CliError::from_io_error(e, &parent.display().to_string()))?;
        }

        let toml_string = toml::to_string_pretty(&config).context("Failed to encode configuration")?;
        fs::write(&self.config_path, toml_string)
            .map_err(|e| CliError::from_io_error(e, &self.config_path.display().to_string()))?;

        log::debug!("Set {key} in {}", self.config_path.display());
        Ok(())
    }

    /// List all configuration values
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let config = self.load()?;
        let value = toml::Value::try_from(&config).context("Failed to encode configuration")?;

        let mut items = Vec::new();
        Self::collect_values(&value, String::new(), &mut items);
        items.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(items)
    }

    /// Recursively collect all key-value pairs from TOML
    fn collect_values(value: &toml::Value, prefix: String, items: &mut Vec<(String, String)>) {
        match value {
            toml::Value::Table(table) => {
                for (key, val) in table {
                    let new_prefix = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    Self::collect_values(val, new_prefix, items);
                }
            }
            toml::Value::String(s) => items.push((prefix, s.clone())),
            toml::Value::Integer(i) => items.push((prefix, i.to_string())),
            toml::Value::Float(f) => items.push((prefix, f.to_string())),
            toml::Value::Boolean(b) => items.push((prefix, b.to_string())),
            _ => {} // Skip arrays and datetimes
        }
    }
}

fn ensure_known_key(key: &str) -> CliResult<()> {
    if CONFIG_KEYS.contains(&key) {
        Ok(())
    } else {
        Err(CliError::unknown_key(key, &CONFIG_KEYS))
    }
}

/// Validate a value and convert it to its TOML type
fn parse_config_value(key: &str, value: &str) -> CliResult<toml::Value> {
    let invalid = |reason: &str| {
        CliError::misuse(&format!("Invalid value '{value}' for {key}"))
            .with_context("reason", reason)
    };

    match key {
        "discovery.pattern" => {
            NamePattern::new(value).map_err(|e| invalid(&e.to_string()))?;
            Ok(toml::Value::String(value.to_string()))
        }
        "report.csv_delimiter" => {
            parse_delimiter(value).map_err(|e| invalid(&e.to_string()))?;
            Ok(toml::Value::String(value.to_string()))
        }
        k if k.ends_with("_enabled") || k.ends_with("_pretty") => value
            .parse()
            .map(toml::Value::Boolean)
            .map_err(|_| invalid("Value must be 'true' or 'false'")),
        _ => Ok(toml::Value::String(value.to_string())),
    }
}
