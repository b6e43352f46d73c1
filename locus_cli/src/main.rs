use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::generate;
use colored::*;
use std::path::PathBuf;

use locus_cli::commands::{FindOptions, ReportRequest, find_files, run_report};
use locus_cli::config::{AppConfig, ConfigManager};
use locus_cli::error::{CliError, CliResult, ErrorContext, ExitCode};
use locus_cli::output::{ReportSettings, formats_by_extension};

#[derive(Parser)]
#[command(name = "locus")]
#[command(author, version, about = "Locus - Source file discovery and report emission", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List files matching a pattern below the given paths
    Find {
        /// Files or directories to search
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Glob matched against file names (default from config, "*.py")
        #[arg(short, long, value_name = "PATTERN")]
        pattern: Option<String>,

        /// Print shortened paths without extensions
        #[arg(long)]
        pretty: bool,

        /// Prefix removed by --pretty (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        leading: Option<String>,
    },

    /// Write collected files to report outputs, formatted by extension
    Report {
        /// Files or directories to search
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Report destination (can be specified multiple times)
        #[arg(short, long = "output", value_name = "FILE", required = true)]
        outputs: Vec<PathBuf>,

        /// Glob matched against file names (default from config, "*.py")
        #[arg(short, long, value_name = "PATTERN")]
        pattern: Option<String>,

        /// Prefix stripped from paths in text reports
        #[arg(long, value_name = "DIR")]
        leading: Option<String>,
    },

    /// List report formats and their output extensions
    Formats,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g., report.csv_delimiter)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., report.csv_delimiter)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration values
    List,

    /// Show the configuration file path
    Path,
}

fn main() {
    let cli = Cli::parse();
    let debug = cli.debug;

    // Initialize logging based on debug flag
    if debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("locus_core", log::LevelFilter::Debug)
            .filter_module("locus_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if let Err(error) = run(cli) {
        eprint!("{}", error.format_for_user(debug));
        std::process::exit(error.exit_code() as i32);
    }

    std::process::exit(ExitCode::Success as i32);
}

fn run(cli: Cli) -> CliResult<()> {
    let manager = ConfigManager::new();
    let mut config = manager.load().map_err(|e| {
        CliError::from(e).with_context("config", &manager.get_config_path().display().to_string())
    })?;

    if !config.output.color_enabled {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Find {
            paths,
            pattern,
            pretty,
            leading,
        } => find_command(&mut config, paths, pattern, pretty, leading),
        Commands::Report {
            paths,
            outputs,
            pattern,
            leading,
        } => report_command(&mut config, paths, outputs, pattern, leading),
        Commands::Formats => formats_command(),
        Commands::Config { command } => config_command(&manager, command),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}

fn find_command(
    config: &mut AppConfig,
    paths: Vec<PathBuf>,
    pattern: Option<String>,
    pretty: bool,
    leading: Option<String>,
) -> CliResult<()> {
    config.apply_cli_overrides(pattern, leading);

    let options = FindOptions {
        pattern: config.discovery.pattern.clone(),
        pretty,
        leading: Some(config.report.leading.clone()).filter(|l| !l.is_empty()),
    };

    for line in find_files(&paths, &options)? {
        println!("{line}");
    }

    Ok(())
}

fn report_command(
    config: &mut AppConfig,
    paths: Vec<PathBuf>,
    outputs: Vec<PathBuf>,
    pattern: Option<String>,
    leading: Option<String>,
) -> CliResult<()> {
    config.apply_cli_overrides(pattern, leading);

    let request = ReportRequest {
        paths,
        pattern: config.discovery.pattern.clone(),
        outputs,
        settings: ReportSettings {
            leading: Some(config.report.leading.clone()).filter(|l| !l.is_empty()),
            csv_delimiter: config.report.csv_delimiter.clone(),
            json_pretty: config.report.json_pretty,
        },
    };

    let summary = run_report(&request)?;

    for output in &summary.written {
        println!("{} {}", "Wrote".green(), output.display());
    }
    println!("{} file(s) reported", summary.files);

    Ok(())
}

fn formats_command() -> CliResult<()> {
    let mut formats: Vec<_> = formats_by_extension()?.into_iter().collect();
    formats.sort_unstable();

    for (extension, name) in formats {
        println!("{:<8} {}", extension.bold(), name);
    }

    Ok(())
}

fn config_command(manager: &ConfigManager, command: ConfigCommand) -> CliResult<()> {
    match command {
        ConfigCommand::Get { key } => {
            println!("{}", manager.get(&key)?);
        }
        ConfigCommand::Set { key, value } => {
            manager.set(&key, &value)?;
            println!("{} {key} = {value}", "Set".green());
        }
        ConfigCommand::List => {
            for (key, value) in manager.list()? {
                println!("{} = {value}", key.bold());
            }
        }
        ConfigCommand::Path => {
            println!("{}", manager.get_config_path().display());
        }
    }

    Ok(())
}
