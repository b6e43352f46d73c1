//! Validation related error types

use thiserror::Error;

/// Input validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A mapping could not be inverted because two keys share a value
    #[error("There were duplicate values in argument. Values: [{}]", values.join(", "))]
    DuplicateValue { values: Vec<String> },

    /// A glob pattern failed to compile
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A formatter option had an unusable value
    #[error("Invalid option '{option}': {reason}")]
    InvalidOption { option: String, reason: String },
}

impl ValidationError {
    /// Create a duplicate value error from the debug renderings of the original values
    pub fn duplicate_value(values: Vec<String>) -> Self {
        Self::DuplicateValue { values }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(pattern: &str, reason: &str) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid option error
    pub fn invalid_option(option: &str, reason: &str) -> Self {
        Self::InvalidOption {
            option: option.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_value_lists_values() {
        let error = ValidationError::duplicate_value(vec!["1".to_string(), "1".to_string()]);

        assert!(error.to_string().contains("duplicate values"));
        assert!(error.to_string().contains("[1, 1]"));
    }

    #[test]
    fn test_invalid_pattern_error() {
        let error = ValidationError::invalid_pattern("[a-", "unclosed character class");

        assert!(matches!(error, ValidationError::InvalidPattern { .. }));
        assert!(error.to_string().contains("[a-"));
        assert!(error.to_string().contains("unclosed"));
    }

    #[test]
    fn test_invalid_option_error() {
        let error = ValidationError::invalid_option("delimiter", "must be a single byte");

        assert!(error.to_string().contains("delimiter"));
        assert!(error.to_string().contains("single byte"));
    }
}
