use colored::*;
use locus_core::error::{IoErrorKind, ValidationError};
use std::error::Error as StdError;
use std::fmt;
use std::io;

/// CLI-specific error type with semantic exit codes
#[derive(Debug)]
pub struct CliError {
    /// The main error message
    message: String,

    /// Error category for exit code determination
    category: ErrorCategory,

    /// Additional context information
    context: Vec<(String, String)>,

    /// Suggestions for recovery
    pub suggestions: Vec<String>,

    /// Source error if any
    source: Option<Box<dyn StdError + Send + Sync>>,
}

/// Error categories that map to exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorCategory {
    General,
    Misuse,
    Filesystem,
    Report,
}

/// Semantic exit codes for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    Misuse = 2,
    FilesystemError = 4,
    ReportError = 5,
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Extension trait for adding context to errors
pub trait ErrorContext {
    fn with_context(self, key: &str, value: &str) -> Self;
    fn with_suggestion(self, suggestion: &str) -> Self;
    fn with_source(self, source: Box<dyn StdError + Send + Sync>) -> Self;
}

impl CliError {
    fn new(message: &str, category: ErrorCategory) -> Self {
        Self {
            message: message.to_string(),
            category,
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    /// Create a general error
    pub fn general(message: &str) -> Self {
        Self::new(message, ErrorCategory::General)
    }

    /// Create a command misuse error
    pub fn misuse(message: &str) -> Self {
        let mut error = Self::new(message, ErrorCategory::Misuse);
        error
            .suggestions
            .push("Run 'locus --help' for usage information".to_string());
        error
    }

    /// Create an error for a configuration key that does not exist
    pub fn unknown_key(key: &str, known_keys: &[&str]) -> Self {
        let mut error = Self::new(
            &format!("Unknown configuration key: {key}"),
            ErrorCategory::Misuse,
        );

        if let Some(known) = closest(key, known_keys) {
            error.suggestions.push(format!("Did you mean '{known}'?"));
        }
        error
            .suggestions
            .push("Run 'locus config list' to see every key".to_string());

        error
    }

    /// Create a filesystem error
    pub fn filesystem(message: &str) -> Self {
        let lowered = message.to_lowercase();

        // Add specific suggestions based on the message
        if lowered.contains("not found") {
            Self::filesystem_with_hints(message, io::ErrorKind::NotFound)
        } else if lowered.contains("permission") || lowered.contains("denied") {
            Self::filesystem_with_hints(message, io::ErrorKind::PermissionDenied)
        } else {
            Self::new(message, ErrorCategory::Filesystem)
        }
    }

    /// Create a filesystem error with the suggestions that fit `kind`
    fn filesystem_with_hints(message: &str, kind: io::ErrorKind) -> Self {
        let mut error = Self::new(message, ErrorCategory::Filesystem);

        match kind {
            io::ErrorKind::NotFound => {
                error
                    .suggestions
                    .push("Check if the file or directory exists".to_string());
                error
                    .suggestions
                    .push("Verify you have the correct path".to_string());
            }
            io::ErrorKind::PermissionDenied => {
                error.suggestions.push("Check file permissions".to_string());
            }
            _ => {}
        }

        error
    }

    /// Create a report error
    pub fn report(message: &str) -> Self {
        Self::new(message, ErrorCategory::Report)
    }

    /// Create an error from an IO error
    pub fn from_io_error(error: io::Error, path: &str) -> Self {
        let message = format!("IO error on '{path}': {error}");
        let mut cli_error = match error.kind() {
            kind @ (io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied) => {
                Self::filesystem_with_hints(&message, kind)
            }
            _ => Self::general(&message),
        };

        cli_error.source = Some(Box::new(error));
        cli_error
            .context
            .push(("path".to_string(), path.to_string()));
        cli_error
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self.category {
            ErrorCategory::General => ExitCode::GeneralError,
            ErrorCategory::Misuse => ExitCode::Misuse,
            ErrorCategory::Filesystem => ExitCode::FilesystemError,
            ErrorCategory::Report => ExitCode::ReportError,
        }
    }

    fn label(&self) -> &'static str {
        match self.category {
            ErrorCategory::General => "Error",
            ErrorCategory::Misuse => "Usage Error",
            ErrorCategory::Filesystem => "File Error",
            ErrorCategory::Report => "Report Error",
        }
    }

    /// Format the error for user display
    pub fn format_for_user(&self, debug: bool) -> String {
        let mut output = String::new();

        let prefix = match self.category {
            ErrorCategory::Misuse => self.label().yellow(),
            _ => self.label().red(),
        };

        output.push_str(&format!("{}: {}\n", prefix, self.message));

        if !self.context.is_empty() {
            output.push_str("\nContext:\n");
            for (key, value) in &self.context {
                output.push_str(&format!("  {}: {}\n", key.bold(), value));
            }
        }

        // Error chain in debug mode
        if debug && let Some(source) = &self.source {
            output.push_str("\nCaused by:\n");
            let mut current: Option<&dyn StdError> = Some(source.as_ref());
            let mut level = 1;

            while let Some(err) = current {
                output.push_str(&format!("  {level}: {err}\n"));
                current = err.source();
                level += 1;
            }
        }

        if !self.suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for suggestion in &self.suggestions {
                output.push_str(&format!("  • {suggestion}\n"));
            }
        }

        output
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label(), self.message)?;

        for (key, value) in &self.context {
            write!(f, " ({key}: {value})")?;
        }

        Ok(())
    }
}

impl StdError for CliError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl ErrorContext for CliError {
    fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.push((key.to_string(), value.to_string()));
        self
    }

    fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestions.push(suggestion.to_string());
        self
    }

    fn with_source(mut self, source: Box<dyn StdError + Send + Sync>) -> Self {
        self.source = Some(source);
        self
    }
}

/// Convert anyhow errors to CLI errors
impl From<anyhow::Error> for CliError {
    fn from(error: anyhow::Error) -> Self {
        Self::general(&format!("{error:#}"))
    }
}

/// Convert library errors to CLI errors
impl From<locus_core::Error> for CliError {
    fn from(error: locus_core::Error) -> Self {
        let message = error.to_string();
        let cli_error = match &error {
            locus_core::Error::Io(io) => {
                let mut cli_error = match io.kind {
                    IoErrorKind::FileNotFound => {
                        Self::filesystem_with_hints(&message, io::ErrorKind::NotFound)
                    }
                    IoErrorKind::PermissionDenied => {
                        Self::filesystem_with_hints(&message, io::ErrorKind::PermissionDenied)
                    }
                    IoErrorKind::Other => Self::general(&message),
                };
                if let Some(path) = &io.path {
                    cli_error = cli_error.with_context("path", &path.display().to_string());
                }
                cli_error
            }
            locus_core::Error::Validation(ValidationError::InvalidPattern { .. }) => {
                Self::misuse(&message)
                    .with_suggestion("Quote the pattern so the shell does not expand it")
            }
            locus_core::Error::Validation(_) => Self::misuse(&message),
            locus_core::Error::Aggregate(aggregate) => Self::report(&format!(
                "{} report(s) could not be written\n{}",
                aggregate.len(),
                aggregate.formatted_traces().trim_end()
            )),
            locus_core::Error::Format { .. } => Self::report(&message),
            locus_core::Error::MissingDependency { .. } => Self::general(&message),
        };

        cli_error.with_source(Box::new(error))
    }
}

/// Closest candidate within two edits of `input`
fn closest<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|candidate| (levenshtein_distance(input, candidate), *candidate))
        .filter(|(distance, _)| *distance <= 2)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate)
}

/// Simple Levenshtein distance for suggestions
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let len1 = s1_chars.len();
    let len2 = s2_chars.len();
    let mut matrix = vec![vec![0; len2 + 1]; len1 + 1];

    for (i, row) in matrix.iter_mut().enumerate().take(len1 + 1) {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate().take(len2 + 1) {
        *cell = j;
    }

    for (i, c1) in s1_chars.iter().enumerate() {
        let i1 = i + 1;
        for (j, c2) in s2_chars.iter().enumerate() {
            let j1 = j + 1;
            let cost = if c1 == c2 { 0 } else { 1 };
            matrix[i1][j1] = std::cmp::min(
                std::cmp::min(matrix[i][j1] + 1, matrix[i1][j] + 1),
                matrix[i][j] + cost,
            );
        }
    }

    matrix[len1][len2]
}
