//! Aggregation of independent failures
//!
//! Orchestration code that runs several independent operations (for
//! example writing one report per output file) keeps going after a failure
//! and reports everything together at the end. Each failure is captured as
//! plain strings so the aggregate stays `Send + Sync` regardless of the
//! original error types.

use std::error::Error as StdError;
use std::fmt;

const RULE: &str = "----------";

/// A single captured failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFailure {
    /// Type name of the captured error
    pub type_name: String,
    /// Display message of the captured error
    pub message: String,
    /// Rendered error with its full source chain, newline terminated
    pub trace: String,
}

impl CapturedFailure {
    /// Capture an error together with its source chain
    pub fn capture<E>(error: &E) -> Self
    where
        E: StdError + 'static,
    {
        Self::from_dyn(std::any::type_name::<E>(), error)
    }

    /// Capture a type-erased error under an explicit type name
    pub fn from_dyn(type_name: &str, error: &(dyn StdError + 'static)) -> Self {
        let message = error.to_string();
        let mut trace = format!("{type_name}: {message}\n");

        let mut next = error.source();
        while let Some(cause) = next {
            trace.push_str(&format!("  caused by: {cause}\n"));
            next = cause.source();
        }

        Self {
            type_name: type_name.to_string(),
            message,
            trace,
        }
    }
}

/// Error holding a group of other errors, in the order they occurred
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateError {
    failures: Vec<CapturedFailure>,
}

impl AggregateError {
    /// Build an aggregate from already captured failures
    pub fn new(failures: Vec<CapturedFailure>) -> Self {
        Self { failures }
    }

    /// Capture every error in `errors`
    pub fn from_errors<I, E>(errors: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: StdError + 'static,
    {
        Self {
            failures: errors
                .into_iter()
                .map(|error| CapturedFailure::capture(&error))
                .collect(),
        }
    }

    /// Captured failures in occurrence order
    pub fn failures(&self) -> &[CapturedFailure] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// All captured traces joined by a blank line
    pub fn formatted_traces(&self) -> String {
        self.failures
            .iter()
            .map(|failure| failure.trace.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Errors:\n{RULE}\n{}{RULE}", self.formatted_traces())
    }
}

impl StdError for AggregateError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[derive(Debug)]
    struct Wrapper(io::Error);

    #[derive(Debug)]
    struct Outer(Wrapper);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "batch failed")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    impl fmt::Display for Wrapper {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "report failed")
        }
    }

    impl StdError for Wrapper {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_capture_records_type_and_message() {
        let error = io::Error::other("disk full");
        let failure = CapturedFailure::capture(&error);

        let type_name = std::any::type_name::<io::Error>();

        assert_eq!(failure.type_name, type_name);
        assert_eq!(failure.message, "disk full");
        assert_eq!(failure.trace, format!("{type_name}: disk full\n"));
    }

    #[test]
    fn test_capture_walks_source_chain() {
        let error = Wrapper(io::Error::other("short write"));
        let failure = CapturedFailure::capture(&error);

        assert!(failure.trace.starts_with(&format!("{}: report failed\n", failure.type_name)));
        assert!(failure.trace.ends_with("  caused by: short write\n"));
    }

    #[test]
    fn test_capture_walks_nested_chain_in_order() {
        let error = Outer(Wrapper(io::Error::other("short write")));
        let failure = CapturedFailure::capture(&error);

        assert_eq!(
            failure.trace,
            format!(
                "{}: batch failed\n  caused by: report failed\n  caused by: short write\n",
                failure.type_name
            )
        );
    }

    #[test]
    fn test_display_concatenates_all_traces() {
        let aggregate = AggregateError::from_errors(vec![
            io::Error::other("first"),
            io::Error::other("second"),
        ]);

        let type_name = std::any::type_name::<io::Error>();

        assert_eq!(aggregate.len(), 2);
        assert_eq!(
            aggregate.to_string(),
            format!(
                "Errors:\n----------\n{type_name}: first\n\n{type_name}: second\n----------"
            )
        );
    }

    #[test]
    fn test_empty_aggregate() {
        let aggregate = AggregateError::new(Vec::new());

        assert!(aggregate.is_empty());
        assert_eq!(aggregate.to_string(), "Errors:\n----------\n----------");
    }
}
