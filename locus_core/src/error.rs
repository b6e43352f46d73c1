//! Error types for the locus core library
//!
//! This module contains all error types used throughout the library, organized
//! into logical categories.

use thiserror::Error;

pub mod aggregate;
pub mod io;
pub mod validation;

pub use self::aggregate::{AggregateError, CapturedFailure};
pub use self::io::{IoError, IoErrorKind};
pub use self::validation::ValidationError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the locus core library
///
/// - I/O errors: filesystem traversal and report sink operations
/// - Aggregate errors: several independent failures reported together
/// - Missing dependency: an optional capability was used without its support
/// - Validation errors: unusable input (duplicate values, bad patterns, bad options)
/// - Format errors: a report formatter could not render its data
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error(transparent)]
    Io(#[from] IoError),

    /// A group of independent failures
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    /// A feature needs a library or tool that is not available
    #[error("{feature} requires {dependency}, which is not available")]
    MissingDependency { feature: String, dependency: String },

    /// Validation related errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Rendering failure inside a report formatter
    #[error("{formatter} formatter failed: {message}")]
    Format { formatter: String, message: String },
}

impl Error {
    /// Create a missing dependency error
    pub fn missing_dependency(feature: &str, dependency: &str) -> Self {
        Self::MissingDependency {
            feature: feature.to_string(),
            dependency: dependency.to_string(),
        }
    }

    /// Create a formatter failure
    pub fn format(formatter: &str, message: impl std::fmt::Display) -> Self {
        Self::Format {
            formatter: formatter.to_string(),
            message: message.to_string(),
        }
    }
}

// Conversions from external error types

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::from_std(source))
    }
}
