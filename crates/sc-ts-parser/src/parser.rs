//! Showcase parser management using tree-sitter.
//!
//! This module provides the [`ShowcaseParser`] struct for statically parsing
//! showcase modules into a [`ParsedShowcase`].

use camino::Utf8Path;
use sc_core::ParsedShowcase;
use tree_sitter::{Language, Node, Parser, Query};

use crate::error::ParseError;
use crate::exports::{extract_showcase, node_to_location};
use crate::queries::{get_tsx_module_query, get_typescript_module_query};

/// Indicates whether the parser is configured for TypeScript or TSX.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserKind {
    TypeScript,
    Tsx,
}

/// Static parser for showcase modules.
///
/// Wraps a tree-sitter parser. The parser can be reused for many files to
/// avoid repeated initialization.
///
/// # Thread Safety
///
/// `ShowcaseParser` is `Send` but not `Sync`, so each thread needs its own
/// instance. Construction only sets the grammar; the compiled [`Query`] is
/// shared across all parser instances.
///
/// # Examples
///
/// ```
/// use sc_ts_parser::ShowcaseParser;
///
/// let mut parser = ShowcaseParser::new()?;
/// let parsed = parser.parse(r#"
///     export default { title: "Button" };
///     export const Primary = () => <button>Primary</button>;
/// "#)?;
///
/// assert_eq!(parsed.title(), Some("Button"));
/// assert_eq!(parsed.variant_names().collect::<Vec<_>>(), ["Primary"]);
/// # Ok::<(), sc_ts_parser::ParseError>(())
/// ```
pub struct ShowcaseParser {
    /// The underlying tree-sitter parser.
    parser: Parser,
    /// Whether this is a TypeScript or TSX parser.
    kind: ParserKind,
}

impl ShowcaseParser {
    /// Creates a new TSX parser.
    ///
    /// TSX is a superset of the JSX found in `.showcase.jsx` files, so this
    /// parser handles both showcase suffixes.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::LanguageInit`] if the TSX language cannot be set
    /// on the parser.
    pub fn new() -> Result<Self, ParseError> {
        Self::with_language(tree_sitter_typescript::LANGUAGE_TSX.into(), ParserKind::Tsx)
    }

    /// Creates a new plain TypeScript parser (no JSX).
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::LanguageInit`] if the TypeScript language cannot
    /// be set on the parser.
    pub fn new_typescript() -> Result<Self, ParseError> {
        Self::with_language(
            tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            ParserKind::TypeScript,
        )
    }

    /// Creates the parser matching a file's extension.
    ///
    /// `.ts`, `.mts` and `.cts` files use the TypeScript grammar (where
    /// `<T>expr` is a type assertion); everything else uses TSX.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::LanguageInit`] if the language cannot be set.
    pub fn for_path(path: &Utf8Path) -> Result<Self, ParseError> {
        match path.extension() {
            Some("ts" | "mts" | "cts") => Self::new_typescript(),
            _ => Self::new(),
        }
    }

    fn with_language(language: Language, kind: ParserKind) -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|_| ParseError::LanguageInit)?;

        Ok(Self { parser, kind })
    }

    /// Returns the module query for this parser's language.
    fn get_query(&self) -> Result<&'static Query, ParseError> {
        match self.kind {
            ParserKind::TypeScript => get_typescript_module_query(),
            ParserKind::Tsx => get_tsx_module_query(),
        }
    }

    /// Parses showcase source code into metadata and variants.
    ///
    /// # Errors
    ///
    /// - Returns [`ParseError::Syntax`] pointing at the first syntax error
    /// - Returns [`ParseError::Parse`] if tree-sitter produced no tree
    /// - Returns [`ParseError::QueryCompile`] if the module query fails to compile
    pub fn parse(&mut self, source: &str) -> Result<ParsedShowcase, ParseError> {
        let tree = self.parser.parse(source, None).ok_or(ParseError::Parse)?;

        if let Some(node) = first_error(tree.root_node()) {
            let location = node_to_location(node);
            return Err(ParseError::Syntax {
                line: location.line,
                column: location.column,
            });
        }

        let query = self.get_query()?;
        Ok(extract_showcase(&tree, source, query))
    }
}

impl std::fmt::Debug for ShowcaseParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShowcaseParser")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Finds the first `ERROR` or `MISSING` node in document order.
fn first_error(root: Node<'_>) -> Option<Node<'_>> {
    if !root.has_error() {
        return None;
    }

    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if !cursor.goto_first_child() {
            return Some(node);
        }
        // Move to the first child that carries the error.
        loop {
            let child = cursor.node();
            if child.has_error() || child.is_missing() {
                break;
            }
            if !cursor.goto_next_sibling() {
                return Some(node);
            }
        }
    }
}
