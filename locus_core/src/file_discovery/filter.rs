//! Base-name matching using glob patterns
//!
//! Patterns follow shell glob rules (`*`, `?`, `[seq]`, `[!seq]`) and are
//! matched against a file's base name only, never its full path. Every other
//! character is literal, including `{`, `}`, `\` and a `[` with no closing
//! `]`. Matching ignores case on Windows only.

use globset::{GlobBuilder, GlobMatcher};
use std::path::Path;

use crate::{Result, error::ValidationError};

/// Compiled glob pattern matched against file base names
#[derive(Debug, Clone)]
pub struct NamePattern {
    /// Compiled matcher
    matcher: GlobMatcher,
    /// Original pattern for debugging
    pattern: String,
}

impl NamePattern {
    /// Compile `pattern`, failing with a validation error if it is malformed
    pub fn new(pattern: &str) -> Result<Self> {
        let glob = GlobBuilder::new(&shell_glob(pattern))
            .backslash_escape(false)
            .allow_unclosed_class(true)
            .case_insensitive(cfg!(windows))
            .build()
            .map_err(|e| ValidationError::invalid_pattern(pattern, &e.kind().to_string()))?;

        Ok(Self {
            matcher: glob.compile_matcher(),
            pattern: pattern.to_string(),
        })
    }

    /// Check whether the base name of `path` matches the pattern
    ///
    /// Paths without a base name (such as `/` or `..`) never match.
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| self.matcher.is_match(Path::new(name)))
    }

    /// Get the original pattern
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// Rewrite a shell glob into globset syntax
///
/// Closed classes are copied as they are. Braces and unclosed `[` become
/// single-character classes so globset reads them literally.
fn shell_glob(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut translated = String::with_capacity(pattern.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    translated.extend(&chars[i..=end]);
                    i = end;
                }
                None => translated.push_str("[[]"),
            },
            '{' => translated.push_str("[{]"),
            '}' => translated.push_str("[}]"),
            c => translated.push(c),
        }
        i += 1;
    }

    translated
}

/// Index of the `]` closing the class opened at `start`
///
/// A `]` directly after `[` or `[!` is a member of the class, not its end.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start + 1;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }

    chars[j.min(chars.len())..]
        .iter()
        .position(|&c| c == ']')
        .map(|offset| j + offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_matches_extension() {
        let pattern = NamePattern::new("*.py").unwrap();

        assert!(pattern.matches(Path::new("mod.py")));
        assert!(pattern.matches(Path::new("/src/pkg/mod.py")));
        assert!(!pattern.matches(Path::new("mod.pyc")));
        assert!(!pattern.matches(Path::new("mod.txt")));
    }

    #[test]
    fn test_matches_base_name_not_directories() {
        let pattern = NamePattern::new("test_*").unwrap();

        assert!(pattern.matches(Path::new("/repo/pkg/test_util.py")));
        assert!(!pattern.matches(Path::new("/repo/test_data/util.py")));
    }

    #[test]
    fn test_question_mark_and_character_classes() {
        let single = NamePattern::new("?.py").unwrap();
        assert!(single.matches(Path::new("a.py")));
        assert!(!single.matches(Path::new("ab.py")));

        let class = NamePattern::new("[ab]*.py").unwrap();
        assert!(class.matches(Path::new("alpha.py")));
        assert!(class.matches(Path::new("beta.py")));
        assert!(!class.matches(Path::new("gamma.py")));

        let negated = NamePattern::new("[!_]*.py").unwrap();
        assert!(negated.matches(Path::new("mod.py")));
        assert!(!negated.matches(Path::new("__init__.py")));
    }

    #[cfg(not(windows))]
    #[test]
    fn test_matching_is_case_sensitive() {
        let pattern = NamePattern::new("*.py").unwrap();

        assert!(!pattern.matches(Path::new("MOD.PY")));
    }

    #[cfg(windows)]
    #[test]
    fn test_matching_ignores_case_on_windows() {
        let pattern = NamePattern::new("*.py").unwrap();

        assert!(pattern.matches(Path::new("MOD.PY")));
    }

    #[test]
    fn test_braces_are_literal() {
        let pattern = NamePattern::new("file{1}.py").unwrap();

        assert!(pattern.matches(Path::new("file{1}.py")));
        assert!(!pattern.matches(Path::new("file1.py")));

        let comma = NamePattern::new("{a,b}.py").unwrap();
        assert!(comma.matches(Path::new("{a,b}.py")));
        assert!(!comma.matches(Path::new("a.py")));
    }

    #[cfg(not(windows))]
    #[test]
    fn test_backslash_is_literal() {
        let pattern = NamePattern::new("a\\b.py").unwrap();

        assert!(pattern.matches(Path::new("a\\b.py")));
        assert!(!pattern.matches(Path::new("ab.py")));
    }

    #[test]
    fn test_unclosed_bracket_is_literal() {
        let pattern = NamePattern::new("[x.py").unwrap();
        assert!(pattern.matches(Path::new("[x.py")));
        assert!(!pattern.matches(Path::new("x.py")));

        let lone = NamePattern::new("[").unwrap();
        assert!(lone.matches(Path::new("[")));
    }

    #[test]
    fn test_braces_inside_class_stay_members() {
        let pattern = NamePattern::new("[{}]*.py").unwrap();

        assert!(pattern.matches(Path::new("{mod.py")));
        assert!(pattern.matches(Path::new("}mod.py")));
        assert!(!pattern.matches(Path::new("mod.py")));
    }

    #[test]
    fn test_leading_bracket_is_class_member() {
        let pattern = NamePattern::new("[]a]*.py").unwrap();
        assert!(pattern.matches(Path::new("]x.py")));
        assert!(pattern.matches(Path::new("ax.py")));

        let negated = NamePattern::new("[!]]*.py").unwrap();
        assert!(negated.matches(Path::new("x.py")));
        assert!(!negated.matches(Path::new("]x.py")));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let error = NamePattern::new("[z-a].py").unwrap_err();

        assert!(error.to_string().contains("Invalid glob pattern"));
        assert!(error.to_string().contains("[z-a].py"));
    }

    #[test]
    fn test_path_without_base_name_never_matches() {
        let pattern = NamePattern::new("*").unwrap();

        assert!(!pattern.matches(Path::new("/")));
        assert!(!pattern.matches(Path::new("..")));
    }
}
