//! Error types for the sc-scanner crate.
//!
//! This module provides the [`ScanError`] type for errors that can occur
//! during pattern compilation, directory traversal and file loading.

use camino::Utf8PathBuf;

/// Errors that can occur during discovery and loading.
///
/// # Error Recovery Strategy
///
/// - **Pattern errors** ([`ScanError::InvalidPattern`]): Fatal - the config is unusable
/// - **Walker errors** ([`ScanError::Walk`]): Fatal at the walk root; deeper
///   entries are logged and skipped
/// - **File read errors** ([`ScanError::Read`]): Recovered into a failed load outcome
/// - **Parse errors** ([`ScanError::Parse`]): Recovered into a failed load outcome
///
/// # Examples
///
/// ```
/// use sc_scanner::ScanError;
///
/// fn handle_error(err: &ScanError) -> &'static str {
///     match err {
///         ScanError::Walk(_) => "walk",
///         ScanError::InvalidPattern { .. } => "pattern",
///         ScanError::NonUtf8Path(_) => "path",
///         ScanError::Config(_) => "config",
///         ScanError::Read { .. } => "read",
///         ScanError::Parse { .. } => "parse",
///     }
/// }
///
/// assert_eq!(handle_error(&ScanError::config("missing root")), "config");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Failed to walk a directory.
    #[error("failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// A glob pattern (include or exclude) failed to compile.
    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as written in the configuration.
        pattern: String,
        /// The underlying glob error.
        #[source]
        source: glob::PatternError,
    },

    /// A path is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", _0.display())]
    NonUtf8Path(std::path::PathBuf),

    /// Invalid discovery setup, e.g. a root that is not a directory.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Failed to read a showcase file.
    #[error("failed to read file {path}: {source}")]
    Read {
        /// The path of the file that couldn't be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a showcase file.
    #[error("failed to parse file {path}: {source}")]
    Parse {
        /// The path of the file that couldn't be parsed.
        path: Utf8PathBuf,
        /// The underlying parse error.
        #[source]
        source: sc_ts_parser::ParseError,
    },
}

impl ScanError {
    /// Creates a new [`ScanError::Read`] error.
    #[inline]
    pub fn read(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`ScanError::Parse`] error.
    #[inline]
    pub fn parse(path: impl Into<Utf8PathBuf>, source: sc_ts_parser::ParseError) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`ScanError::InvalidPattern`] error.
    #[inline]
    pub fn invalid_pattern(pattern: impl Into<String>, source: glob::PatternError) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Creates a new [`ScanError::Config`] error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_scan_error_read() {
        let err = ScanError::read(
            "src/Button.showcase.tsx",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.to_string().contains("src/Button.showcase.tsx"));
    }

    #[test]
    fn test_scan_error_parse() {
        let err = ScanError::parse(
            "src/Card.showcase.tsx",
            sc_ts_parser::ParseError::Syntax { line: 2, column: 4 },
        );
        assert_eq!(
            err.to_string(),
            "failed to parse file src/Card.showcase.tsx: syntax error at line 2, column 4"
        );
    }

    #[test]
    fn test_scan_error_invalid_pattern() {
        let source = glob::Pattern::new("src/[").unwrap_err();
        let err = ScanError::invalid_pattern("src/[", source);
        assert!(err.to_string().contains("'src/['"));
    }

    #[test]
    fn test_scan_error_config() {
        let err = ScanError::config("root path does not exist: /nope");
        assert_eq!(
            err.to_string(),
            "invalid configuration: root path does not exist: /nope"
        );
    }

    #[test]
    fn test_scan_error_non_utf8() {
        let err = ScanError::NonUtf8Path(std::path::PathBuf::from("test"));
        assert!(err.to_string().contains("not valid UTF-8"));
    }
}
