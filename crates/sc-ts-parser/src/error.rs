//! Error types for the sc-ts-parser crate.
//!
//! This module provides the [`ParseError`] type for errors that can occur
//! while statically parsing a showcase file.

/// Errors that can occur during showcase parsing.
///
/// # Examples
///
/// ```
/// use sc_ts_parser::ParseError;
///
/// fn describe(err: &ParseError) -> String {
///     match err {
///         ParseError::LanguageInit => "grammar unavailable".to_owned(),
///         ParseError::QueryCompile { offset, .. } => format!("bad query at {offset}"),
///         ParseError::Parse => "parser gave up".to_owned(),
///         ParseError::Syntax { line, column } => format!("syntax error at {line}:{column}"),
///     }
/// }
///
/// assert_eq!(describe(&ParseError::Syntax { line: 3, column: 7 }), "syntax error at 3:7");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to set the TypeScript/TSX language on the parser.
    #[error("failed to set TypeScript language")]
    LanguageInit,

    /// Failed to compile a tree-sitter query.
    #[error("failed to compile query at offset {offset}: {message}")]
    QueryCompile {
        /// The byte offset in the query string where the error occurred.
        offset: usize,
        /// The tree-sitter error message.
        message: String,
    },

    /// The parser returned no tree (cancelled or out of memory).
    #[error("failed to parse source code")]
    Parse,

    /// The source contains a syntax error.
    ///
    /// Points at the first `ERROR` or `MISSING` node in document order.
    #[error("syntax error at line {line}, column {column}")]
    Syntax {
        /// Line number (1-indexed).
        line: u32,
        /// Column number (0-indexed).
        column: u32,
    },
}

impl ParseError {
    /// Returns `true` if the error is caused by the parsed file rather than
    /// by the parser setup.
    #[must_use]
    pub const fn is_source_error(&self) -> bool {
        matches!(self, Self::Syntax { .. } | Self::Parse)
    }
}
